//! Static configuration for an [`crate::avoider::controller::EvasionController`].
use crate::avoider::oracle::{ColliderId, LayerSet};
use crate::error::{Error, Result};
use crate::sampling::poisson_disk::DEFAULT_ATTEMPTS;
use crate::sampling::ActivePick;

/// Distance at which the agent counts as having reached its target.
pub const ARRIVAL_TOLERANCE: f32 = 1.0;

/// How far a raw sample may be moved to land on a navigable surface.
pub const GROUND_SEARCH_RADIUS: f32 = 1.0;

/// Configuration for evasive movement.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvasionConfig {
    /// Threat distance below which evasion may start.
    pub detection_range: f32,
    /// Movement speed used while retreating.
    pub speed: f32,
    /// Side length of the square sample region around the agent.
    pub area_size: f32,
    /// Minimum separation between sampled candidates.
    pub min_separation: f32,
    /// Darts per active point in the Poisson disk sampler.
    pub sample_attempts: usize,
    /// Active list pop policy of the sampler.
    pub active_pick: ActivePick,
    /// Distance to the target at which it is considered reached.
    pub arrival_tolerance: f32,
    /// Height added to grounded candidates (usually the agent height).
    pub ground_offset: f32,
    /// Search radius for projecting samples onto the navigable surface.
    pub ground_search_radius: f32,
    /// Collider of the agent itself.
    pub agent_collider: ColliderId,
    /// Layers of the agent collider, ignored by point visibility rays.
    pub agent_layers: LayerSet,
    /// Keep the current target when the threat leaves detection range.
    ///
    /// With `false` every exit clears the target, so the agent stops once the
    /// threat is out of range.
    pub keep_target_on_exit: bool,
    /// Seed for the controller RNG.
    pub seed: u64,
    /// Collect debug gizmos. No behavioural effect.
    pub debug_visualization: bool,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self {
            detection_range: 7.5,
            speed: 3.5,
            area_size: 32.0,
            min_separation: 2.0,
            sample_attempts: DEFAULT_ATTEMPTS,
            active_pick: ActivePick::Random,
            arrival_tolerance: ARRIVAL_TOLERANCE,
            ground_offset: 1.0,
            ground_search_radius: GROUND_SEARCH_RADIUS,
            agent_collider: ColliderId::default(),
            agent_layers: LayerSet::empty(),
            keep_target_on_exit: true,
            seed: 0,
            debug_visualization: false,
        }
    }
}

impl EvasionConfig {
    /// Creates a config for the agent identified by `agent_collider` on `agent_layers`.
    pub fn new(agent_collider: ColliderId, agent_layers: LayerSet) -> Self {
        Self {
            agent_collider,
            agent_layers,
            ..Default::default()
        }
    }

    pub fn with_detection_range(mut self, detection_range: f32) -> Self {
        self.detection_range = detection_range;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the side length of the square sample region.
    pub fn with_area_size(mut self, area_size: f32) -> Self {
        self.area_size = area_size;
        self
    }

    pub fn with_min_separation(mut self, min_separation: f32) -> Self {
        self.min_separation = min_separation;
        self
    }

    pub fn with_sample_attempts(mut self, sample_attempts: usize) -> Self {
        self.sample_attempts = sample_attempts;
        self
    }

    pub fn with_active_pick(mut self, active_pick: ActivePick) -> Self {
        self.active_pick = active_pick;
        self
    }

    pub fn with_arrival_tolerance(mut self, arrival_tolerance: f32) -> Self {
        self.arrival_tolerance = arrival_tolerance;
        self
    }

    /// Sets the height added to grounded candidates.
    pub fn with_ground_offset(mut self, ground_offset: f32) -> Self {
        self.ground_offset = ground_offset;
        self
    }

    pub fn with_ground_search_radius(mut self, ground_search_radius: f32) -> Self {
        self.ground_search_radius = ground_search_radius;
        self
    }

    pub fn with_keep_target_on_exit(mut self, keep_target_on_exit: bool) -> Self {
        self.keep_target_on_exit = keep_target_on_exit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_debug_visualization(mut self, debug_visualization: bool) -> Self {
        self.debug_visualization = debug_visualization;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("detection_range", self.detection_range),
            ("speed", self.speed),
            ("area_size", self.area_size),
            ("min_separation", self.min_separation),
            ("arrival_tolerance", self.arrival_tolerance),
            ("ground_search_radius", self.ground_search_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !(self.ground_offset.is_finite() && self.ground_offset >= 0.0) {
            return Err(Error::InvalidConfig("ground_offset must be >= 0".into()));
        }
        if self.sample_attempts == 0 {
            return Err(Error::InvalidConfig("sample_attempts must be >= 1".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EvasionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arrival_tolerance, ARRIVAL_TOLERANCE);
        assert_eq!(config.sample_attempts, 30);
        assert!(config.keep_target_on_exit);
    }

    #[test]
    fn builder_sets_fields() {
        let config = EvasionConfig::new(ColliderId(9), LayerSet::layer(4))
            .with_detection_range(10.0)
            .with_speed(6.0)
            .with_area_size(20.0)
            .with_min_separation(1.5)
            .with_ground_offset(1.8)
            .with_keep_target_on_exit(false)
            .with_seed(77);

        assert_eq!(config.agent_collider, ColliderId(9));
        assert_eq!(config.agent_layers, LayerSet::from_bits_retain(1 << 4));
        assert_eq!(config.detection_range, 10.0);
        assert_eq!(config.speed, 6.0);
        assert_eq!(config.area_size, 20.0);
        assert_eq!(config.min_separation, 1.5);
        assert_eq!(config.ground_offset, 1.8);
        assert!(!config.keep_target_on_exit);
        assert_eq!(config.seed, 77);
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let cases = [
            EvasionConfig::default().with_detection_range(0.0),
            EvasionConfig::default().with_speed(-1.0),
            EvasionConfig::default().with_area_size(0.0),
            EvasionConfig::default().with_min_separation(f32::NAN),
            EvasionConfig::default().with_arrival_tolerance(0.0),
            EvasionConfig::default().with_ground_offset(-0.5),
            EvasionConfig::default().with_sample_attempts(0),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "expected rejection for {config:?}"
            );
        }
    }
}
