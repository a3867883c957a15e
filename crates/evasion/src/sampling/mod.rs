//! Sampling strategies for generating candidate positions in a 2D domain.
//!
//! The avoider uses these to propose retreat points before grounding and
//! visibility filtering.
use mint::Vector2;
use rand::RngCore;

pub mod poisson_disk;

pub use poisson_disk::{ActivePick, PoissonDiskSampling};

/// Trait for position sampling.
///
/// Implementations return points inside `[0, extent.x) x [0, extent.y)`.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Pick a uniformly random index below `len`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rand01(rng) * len as f32) as usize).min(len - 1)
}

/// Compute the next smaller representable float value.
///
/// Used to keep samples strictly inside the upper domain bound, since
/// [`rand01`] can round up to exactly `1.0`.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}
