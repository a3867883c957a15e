//! A flat square arena with cylindrical pillars, standing in for a host engine.
use evasion::prelude::*;
use glam::{Vec2, Vec3};

pub const AGENT_COLLIDER: ColliderId = ColliderId(1);
pub const AGENT_LAYER: LayerSet = LayerSet::layer(1);
pub const PILLAR_LAYER: LayerSet = LayerSet::layer(0);

const PILLAR_COLLIDER_BASE: u64 = 100;
/// Keeps projected points off pillar surfaces.
const SKIN: f32 = 0.05;

#[derive(Debug, Clone, Copy)]
pub struct Pillar {
    pub center: Vec2,
    pub radius: f32,
}

impl Pillar {
    pub fn new(x: f32, z: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, z),
            radius,
        }
    }
}

/// Arena spanning `[-half_extent, half_extent]` on X and Z, ground at `y = 0`.
pub struct ArenaWorld {
    pub half_extent: f32,
    pub pillars: Vec<Pillar>,
    pub agent: Vec3,
    pub agent_radius: f32,
}

impl ArenaWorld {
    pub fn new(half_extent: f32, pillars: Vec<Pillar>) -> Self {
        Self {
            half_extent,
            pillars,
            agent: Vec3::ZERO,
            agent_radius: 0.5,
        }
    }
}

#[inline]
fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Distance along a normalized 2D ray to a circle, if hit in front of the origin.
fn ray_circle(origin: Vec2, dir: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(dir);
    let c = m.length_squared() - radius * radius;
    if c > 0.0 && b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some((-b - disc.sqrt()).max(0.0))
}

impl Raycaster for ArenaWorld {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: LayerSet,
    ) -> Option<RayHit> {
        // Colliders are infinitely tall, so only the horizontal part matters.
        let flat = planar(direction);
        let horizontal = flat.length();
        if horizontal < 1e-6 {
            return None;
        }
        let dir2 = flat / horizontal;
        let origin2 = planar(origin);

        let pillars = (!PILLAR_LAYER.intersects(ignore))
            .then_some(self.pillars.iter().enumerate())
            .into_iter()
            .flatten()
            .filter_map(|(i, p)| {
                ray_circle(origin2, dir2, p.center, p.radius)
                    .map(|t| (t, ColliderId(PILLAR_COLLIDER_BASE + i as u64), PILLAR_LAYER))
            });
        let agent = (!AGENT_LAYER.intersects(ignore))
            .then(|| ray_circle(origin2, dir2, planar(self.agent), self.agent_radius))
            .flatten()
            .map(|t| (t, AGENT_COLLIDER, AGENT_LAYER));

        pillars
            .chain(agent)
            .map(|(t, collider, layers)| (t / horizontal, collider, layers))
            .filter(|(distance, _, _)| *distance <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, collider, layers)| RayHit {
                distance,
                point: origin + direction * distance,
                collider,
                layers,
            })
    }
}

impl NavigationOracle for ArenaWorld {
    fn project_to_navigable(&self, point: Vec3, search_radius: f32) -> Option<Vec3> {
        let original = planar(point);
        let mut p = original.clamp(Vec2::splat(-self.half_extent), Vec2::splat(self.half_extent));

        for pillar in &self.pillars {
            let offset = p - pillar.center;
            let reach = pillar.radius + SKIN;
            if offset.length_squared() < reach * reach {
                let out = offset.try_normalize().unwrap_or(Vec2::X);
                p = pillar.center + out * reach;
            }
        }

        let outside_arena = p.abs().max_element() > self.half_extent;
        if outside_arena || p.distance(original) > search_radius {
            return None;
        }
        Some(Vec3::new(p.x, 0.0, p.y))
    }
}

/// Moves `position` towards the directive's destination for `dt` seconds.
pub fn step_towards(position: Vec3, directive: MoveDirective, dt: f32) -> Vec3 {
    let step = directive.destination - position;
    position + step.clamp_length_max(directive.speed * dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> ArenaWorld {
        ArenaWorld::new(10.0, vec![Pillar::new(0.0, 5.0, 1.0)])
    }

    #[test]
    fn pillar_blocks_ray_and_agent_is_ignorable() {
        let mut world = world();
        world.agent = Vec3::new(3.0, 0.0, 0.0);

        let hit = world
            .cast_ray(Vec3::ZERO, Vec3::Z, 10.0, LayerSet::empty())
            .expect("pillar hit");
        assert!((hit.distance - 4.0).abs() < 1e-4);
        assert_eq!(hit.layers, PILLAR_LAYER);

        let agent_hit = world.cast_ray(Vec3::ZERO, Vec3::X, 10.0, LayerSet::empty());
        assert_eq!(agent_hit.map(|h| h.collider), Some(AGENT_COLLIDER));
        assert!(world.cast_ray(Vec3::ZERO, Vec3::X, 10.0, AGENT_LAYER).is_none());
    }

    #[test]
    fn projection_pushes_out_of_pillars_and_rejects_far_points() {
        let world = world();
        let projected = world
            .project_to_navigable(Vec3::new(0.0, 3.0, 4.5), 1.0)
            .expect("near pillar edge");
        assert_eq!(projected.y, 0.0);
        assert!(Vec2::new(projected.x, projected.z).distance(Vec2::new(0.0, 5.0)) >= 1.0);

        assert!(world.project_to_navigable(Vec3::new(0.0, 0.0, 5.0), 0.5).is_none());
        assert!(world.project_to_navigable(Vec3::new(14.0, 0.0, 0.0), 1.0).is_none());
        assert!(world.project_to_navigable(Vec3::new(10.5, 0.0, 0.0), 1.0).is_some());
    }

    #[test]
    fn step_towards_respects_speed() {
        let directive = MoveDirective {
            destination: Vec3::new(10.0, 0.0, 0.0),
            speed: 2.0,
        };
        assert_eq!(step_towards(Vec3::ZERO, directive, 0.5), Vec3::new(1.0, 0.0, 0.0));
    }
}
