// Each bench target compiles its own copy of this module.
#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};

/// Raw sampler runs are sub-millisecond up to the 64x64 / 0.5 case.
pub fn sampling_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3))
}

/// A resample tick samples, projects and raycasts every point, so the
/// dense separations run in the millisecond range.
pub fn resample_tick_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(15)
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(6))
        .noise_threshold(0.05)
}

/// Throughput in accepted points; a run that yields nothing still counts one.
pub fn points_throughput(points: usize) -> Throughput {
    Throughput::Elements(points.max(1) as u64)
}
