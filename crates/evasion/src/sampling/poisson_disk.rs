//! Poisson disk position sampling strategy.
use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

use crate::sampling::{next_down, rand01, rand_index, PositionSampling};

/// Conventional number of annulus darts thrown around an active point.
pub const DEFAULT_ATTEMPTS: usize = 30;

/// Which active point is expanded next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivePick {
    /// Uniformly random index drawn from the sampler RNG.
    #[default]
    Random,
    /// Always expand the oldest active point.
    Oldest,
    /// Always expand the most recently accepted active point.
    Newest,
}

/// Poisson disk sampling strategy.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in world units.
    pub radius: f32,
    /// Darts thrown per active point before it is retired.
    pub attempts: usize,
    /// Active list pop policy.
    pub pick: ActivePick,
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let bounds = Vec2::from(domain_extent);
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Vec::new();
        }
        if !(bounds.x > 0.0 && bounds.y > 0.0) || !bounds.is_finite() {
            return Vec::new();
        }

        let mut sampler = PoissonDiskSampler::new(self.radius, bounds);
        sampler
            .generate(rng, self.attempts.max(1), self.pick)
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with specified radius.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            attempts: DEFAULT_ATTEMPTS,
            pick: ActivePick::Random,
        }
    }

    /// Set the number of darts per active point.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Set the active list pop policy.
    pub fn with_pick(mut self, pick: ActivePick) -> Self {
        self.pick = pick;
        self
    }
}

struct PoissonDiskSampler {
    radius: f32,
    radius_squared: f32,
    cell_size: f32,
    grid_width: usize,
    grid_height: usize,
    grid: Vec<Option<Vec2>>,
    active_list: VecDeque<Vec2>,
    bounds: Vec2,
}

impl PoissonDiskSampler {
    fn new(radius: f32, bounds: Vec2) -> Self {
        debug_assert!(radius > 0.0);
        let radius_squared = radius * radius;
        let cell_size = radius / std::f32::consts::SQRT_2;
        let grid_width = (bounds.x / cell_size).ceil() as usize + 1;
        let grid_height = (bounds.y / cell_size).ceil() as usize + 1;

        Self {
            radius,
            radius_squared,
            cell_size,
            grid_width,
            grid_height,
            grid: vec![None; grid_width * grid_height],
            active_list: VecDeque::new(),
            bounds,
        }
    }

    #[inline]
    fn grid_index(&self, x: usize, y: usize) -> usize {
        y * self.grid_width + x
    }

    #[inline]
    fn point_to_grid(&self, point: Vec2) -> (usize, usize) {
        let x = ((point.x / self.cell_size).floor() as isize)
            .clamp(0, self.grid_width as isize - 1) as usize;
        let y = ((point.y / self.cell_size).floor() as isize)
            .clamp(0, self.grid_height as isize - 1) as usize;
        (x, y)
    }

    fn is_valid_point(&self, point: Vec2) -> bool {
        if point.x < 0.0 || point.x >= self.bounds.x || point.y < 0.0 || point.y >= self.bounds.y {
            return false;
        }

        // Cell diagonal is `radius`, so any conflict lies within two cells.
        let (gx, gy) = self.point_to_grid(point);
        let start_x = gx.saturating_sub(2);
        let end_x = (gx + 3).min(self.grid_width);
        let start_y = gy.saturating_sub(2);
        let end_y = (gy + 3).min(self.grid_height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                if let Some(existing) = self.grid[self.grid_index(x, y)] {
                    if point.distance_squared(existing) < self.radius_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn add_point(&mut self, point: Vec2) {
        let (gx, gy) = self.point_to_grid(point);
        let idx = self.grid_index(gx, gy);
        self.grid[idx] = Some(point);
        self.active_list.push_back(point);
    }

    fn generate_around_point(
        &self,
        rng: &mut dyn RngCore,
        point: Vec2,
        attempts: usize,
    ) -> Option<Vec2> {
        for _ in 0..attempts {
            let angle = rand01(rng) * TAU;
            // Area-uniform radius in [r, 2r].
            let distance = self.radius * (1.0 + 3.0 * rand01(rng)).sqrt();
            let candidate = point + Vec2::from_angle(angle) * distance;

            if self.is_valid_point(candidate) {
                return Some(candidate);
            }
        }

        None
    }

    fn pick_active(&self, rng: &mut dyn RngCore, pick: ActivePick) -> usize {
        match pick {
            ActivePick::Random => rand_index(rng, self.active_list.len()),
            ActivePick::Oldest => 0,
            ActivePick::Newest => self.active_list.len() - 1,
        }
    }

    fn retire(&mut self, index: usize, pick: ActivePick) {
        match pick {
            // Random draws ignore order.
            ActivePick::Random => {
                self.active_list.swap_remove_back(index);
            }
            ActivePick::Oldest => {
                self.active_list.pop_front();
            }
            ActivePick::Newest => {
                self.active_list.pop_back();
            }
        }
    }

    fn generate(&mut self, rng: &mut dyn RngCore, attempts: usize, pick: ActivePick) -> Vec<Vec2> {
        let initial = Vec2::new(
            (rand01(rng) * self.bounds.x).min(next_down(self.bounds.x)),
            (rand01(rng) * self.bounds.y).min(next_down(self.bounds.y)),
        );
        self.add_point(initial);

        let mut points = vec![initial];

        while !self.active_list.is_empty() {
            let index = self.pick_active(rng, pick);
            let active = self.active_list[index];

            match self.generate_around_point(rng, active, attempts) {
                Some(p) => {
                    self.add_point(p);
                    points.push(p);
                }
                None => self.retire(index, pick),
            }
        }

        points
    }
}
