//! Line-of-sight predicates built on the [`Raycaster`] primitive.
//!
//! The two predicates answer different questions and are not interchangeable:
//! [`point_visible`] asks whether *nothing* blocks a segment, while
//! [`first_hit_is`] asks whether the first thing a ray meets is a specific
//! collider.
use glam::Vec3;

use crate::avoider::geometry::ray_between;
use crate::avoider::oracle::{ColliderId, LayerSet, Raycaster};

/// Hits this close to the end of the segment do not count as blocking.
pub const VISIBILITY_EPSILON: f32 = 1e-3;

/// True iff no collider outside `ignore` lies between `from` and `to`.
pub fn point_visible(raycaster: &dyn Raycaster, from: Vec3, to: Vec3, ignore: LayerSet) -> bool {
    let Some((direction, length)) = ray_between(from, to) else {
        return true;
    };
    match raycaster.cast_ray(from, direction, length, ignore) {
        Some(hit) => hit.distance >= length - VISIBILITY_EPSILON,
        None => true,
    }
}

/// True iff a ray from `from` towards `target_position` first hits `collider`.
///
/// A clear segment that hits nothing is *not* a sighting.
pub fn first_hit_is(
    raycaster: &dyn Raycaster,
    from: Vec3,
    target_position: Vec3,
    collider: ColliderId,
) -> bool {
    let Some((direction, length)) = ray_between(from, target_position) else {
        return false;
    };
    raycaster
        .cast_ray(from, direction, length, LayerSet::empty())
        .is_some_and(|hit| hit.collider == collider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avoider::oracle::RayHit;

    struct Sphere {
        center: Vec3,
        radius: f32,
        collider: ColliderId,
        layers: LayerSet,
    }

    struct Spheres(Vec<Sphere>);

    impl Raycaster for Spheres {
        fn cast_ray(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            ignore: LayerSet,
        ) -> Option<RayHit> {
            self.0
                .iter()
                .filter(|s| !s.layers.intersects(ignore))
                .filter_map(|s| {
                    let along = (s.center - origin).dot(direction);
                    let closest = origin + direction * along;
                    let off2 = closest.distance_squared(s.center);
                    let r2 = s.radius * s.radius;
                    if along < 0.0 || off2 > r2 {
                        return None;
                    }
                    let distance = along - (r2 - off2).sqrt();
                    (distance <= max_distance).then(|| RayHit {
                        distance,
                        point: origin + direction * distance,
                        collider: s.collider,
                        layers: s.layers,
                    })
                })
                .min_by(|a, b| a.distance.total_cmp(&b.distance))
        }
    }

    const AGENT: ColliderId = ColliderId(1);
    const AGENT_LAYER: LayerSet = LayerSet::from_bits_retain(0b10);

    fn world() -> Spheres {
        Spheres(vec![
            Sphere {
                center: Vec3::new(5.0, 0.0, 0.0),
                radius: 0.5,
                collider: AGENT,
                layers: AGENT_LAYER,
            },
            Sphere {
                center: Vec3::new(0.0, 0.0, 5.0),
                radius: 1.0,
                collider: ColliderId(2),
                layers: LayerSet::from_bits_retain(0b1),
            },
        ])
    }

    #[test]
    fn point_behind_agent_is_visible_when_agent_layer_is_ignored() {
        let world = world();
        let behind = Vec3::new(10.0, 0.0, 0.0);
        assert!(point_visible(&world, Vec3::ZERO, behind, AGENT_LAYER));
        assert!(!point_visible(&world, Vec3::ZERO, behind, LayerSet::empty()));
    }

    #[test]
    fn wall_blocks_point_visibility() {
        let world = world();
        assert!(!point_visible(&world, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), AGENT_LAYER));
        assert!(point_visible(&world, Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0), AGENT_LAYER));
    }

    #[test]
    fn agent_sighting_requires_hitting_the_agent() {
        let world = world();
        assert!(first_hit_is(&world, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), AGENT));

        // Nothing on the segment: clear, but not a sighting of the agent.
        let empty = Spheres(Vec::new());
        assert!(!first_hit_is(&empty, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), AGENT));
        assert!(point_visible(&empty, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), AGENT_LAYER));
    }

    #[test]
    fn wall_in_front_of_agent_hides_it() {
        let mut world = world();
        world.0.push(Sphere {
            center: Vec3::new(2.5, 0.0, 0.0),
            radius: 0.5,
            collider: ColliderId(3),
            layers: LayerSet::from_bits_retain(0b1),
        });
        assert!(!first_hit_is(&world, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), AGENT));
    }
}
