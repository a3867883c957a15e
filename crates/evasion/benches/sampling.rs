mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use evasion::sampling::{ActivePick, PoissonDiskSampling, PositionSampling};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const AREAS: [f32; 3] = [16.0, 32.0, 64.0];
const SEPARATIONS: [f32; 4] = [4.0, 2.0, 1.0, 0.5];
const PICKS: [ActivePick; 3] = [ActivePick::Random, ActivePick::Oldest, ActivePick::Newest];

fn sampling_poisson_benches(c: &mut Criterion) {
    for &area in &AREAS {
        let extent = Vec2::splat(area);
        let mut group = c.benchmark_group(format!("sampling/poisson_disk/area_{area:.0}"));

        for &separation in &SEPARATIONS {
            let strategy = PoissonDiskSampling::new(separation);
            let mut rng_est = StdRng::seed_from_u64(0xBEEF_u64 ^ separation.to_bits() as u64);
            let expected = strategy.generate(extent.into(), &mut rng_est).len();
            group.throughput(common::points_throughput(expected));

            let mut rng = StdRng::seed_from_u64(0xC0FFEE_u64 ^ separation.to_bits() as u64);
            group.bench_with_input(
                BenchmarkId::from_parameter(separation),
                &separation,
                |b, _| {
                    b.iter(|| {
                        let pts = strategy.generate(extent.into(), &mut rng);
                        black_box(pts.len());
                    });
                },
            );
        }

        group.finish();
    }
}

fn sampling_pick_policy_benches(c: &mut Criterion) {
    let extent = Vec2::splat(32.0);
    let mut group = c.benchmark_group("sampling/poisson_disk/pick");

    for pick in PICKS {
        let strategy = PoissonDiskSampling::new(1.0).with_pick(pick);
        let mut rng = StdRng::seed_from_u64(0xA11CE);

        group.bench_function(format!("{pick:?}"), |b| {
            b.iter(|| {
                let pts = strategy.generate(extent.into(), &mut rng);
                black_box(pts.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::sampling_criterion();
    targets = sampling_poisson_benches, sampling_pick_policy_benches
}
criterion_main!(benches);
