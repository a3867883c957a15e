//! Collaborator interfaces consumed by the controller.
//!
//! The host engine implements these; the controller only queries them (or,
//! for [`Mover`], issues fire-and-forget directives).
use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Set of collision layers (up to 32).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LayerSet: u32 {
        /// Layer 0, the host's default geometry layer.
        const DEFAULT = 1 << 0;

        // Hosts number their own layers.
        const _ = !0;
    }
}

impl LayerSet {
    /// Set containing a single layer index (`0..32`).
    pub const fn layer(index: u32) -> Self {
        debug_assert!(index < 32);
        LayerSet::from_bits_retain(1 << index)
    }
}

/// Opaque collider identity, used to tell the agent apart from other geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColliderId(pub u64);

/// First intersection reported by a [`Raycaster`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Collider that was hit.
    pub collider: ColliderId,
    /// Layers of the collider that was hit.
    pub layers: LayerSet,
}

/// Physics ray query.
pub trait Raycaster {
    /// Returns the nearest hit along `direction` (normalized) within `max_distance`,
    /// skipping colliders whose layers intersect `ignore`.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: LayerSet,
    ) -> Option<RayHit>;
}

/// Walkability query.
pub trait NavigationOracle {
    /// Nearest point on a navigable surface within `search_radius` of `point`.
    fn project_to_navigable(&self, point: Vec3, search_radius: f32) -> Option<Vec3>;
}

/// Movement directives for the agent.
pub trait Mover {
    fn face_towards(&mut self, point: Vec3);
    fn set_destination(&mut self, point: Vec3);
    fn set_speed(&mut self, speed: f32);
}

/// A no-op mover, used when the host provides no movement capability.
impl Mover for () {
    #[inline]
    fn face_towards(&mut self, _point: Vec3) {}

    #[inline]
    fn set_destination(&mut self, _point: Vec3) {}

    #[inline]
    fn set_speed(&mut self, _speed: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_sets_combine_and_intersect() {
        let agent = LayerSet::layer(3);
        let walls = LayerSet::layer(0);
        let both = agent.union(walls);

        assert!(both.intersects(agent));
        assert!(!walls.intersects(agent));
        assert!(LayerSet::empty().is_empty());
        assert!(LayerSet::all().intersects(agent));
        assert_eq!(both, LayerSet::from_bits_retain(0b1001));
        assert_eq!(walls, LayerSet::DEFAULT);
    }
}
