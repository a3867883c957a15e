//! Geometry helpers: mapping planar samples into world space and building rays.
//!
//! World space is Y-up; samples live on the XZ plane.
use glam::{Vec2, Vec3};

/// Minimum segment length considered a real ray.
pub const MIN_RAY_LENGTH: f32 = 1e-4;

/// Corner of a sample region of size `extent` centred on `center` (XZ plane).
pub fn region_origin(center: Vec3, extent: Vec2) -> Vec3 {
    center - Vec3::new(extent.x * 0.5, 0.0, extent.y * 0.5)
}

/// Maps a sample in `[0, extent.x) x [0, extent.y)` to world space around `center`.
///
/// The sample keeps `center.y` as its height.
pub fn sample_to_world(sample: Vec2, extent: Vec2, center: Vec3) -> Vec3 {
    region_origin(center, extent) + Vec3::new(sample.x, 0.0, sample.y)
}

/// Normalized direction and length of the segment `from -> to`.
///
/// Returns `None` for degenerate segments.
pub fn ray_between(from: Vec3, to: Vec3) -> Option<(Vec3, f32)> {
    let delta = to - from;
    let length = delta.length();
    if !length.is_finite() || length < MIN_RAY_LENGTH {
        return None;
    }
    Some((delta / length, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_is_centred_on_agent() {
        let center = Vec3::new(10.0, 2.0, -4.0);
        let extent = Vec2::new(32.0, 32.0);

        assert_eq!(region_origin(center, extent), Vec3::new(-6.0, 2.0, -20.0));
        assert_eq!(sample_to_world(Vec2::new(16.0, 16.0), extent, center), center);
        assert_eq!(
            sample_to_world(Vec2::new(32.0, 0.0), extent, center),
            Vec3::new(26.0, 2.0, -20.0)
        );
    }

    #[test]
    fn ray_between_normalizes_and_rejects_degenerate() {
        let (dir, len) = ray_between(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!(dir, Vec3::Z);
        assert_eq!(len, 5.0);
        assert!(ray_between(Vec3::ONE, Vec3::ONE).is_none());
    }
}
