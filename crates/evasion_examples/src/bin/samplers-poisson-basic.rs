use evasion::prelude::*;
use evasion_examples::{init_tracing, render_scene_to_png, RenderConfig, Scene};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let extent = Vec2::new(32.0, 32.0);
    let separation = 2.0;
    let mut rng = StdRng::seed_from_u64(42);

    let sampling = PoissonDiskSampling::new(separation).with_pick(ActivePick::Random);
    let points: Vec<Vec2> = sampling
        .generate(extent.into(), &mut rng)
        .into_iter()
        .map(Vec2::from)
        .collect();
    tracing::info!(
        "Sampled {} points in {}x{} with separation {}",
        points.len(),
        extent.x,
        extent.y,
        separation
    );

    // Samples live in [0, extent); shift them to the centred render frame.
    let scene = Scene {
        points: points
            .iter()
            .map(|&p| (p - extent * 0.5, separation * 0.5))
            .collect(),
        ..Default::default()
    };
    let config = RenderConfig::new((800, 800), extent.x * 0.5).with_background([255, 255, 255]);
    render_scene_to_png(&scene, &config, "samplers-poisson-basic.png")
}
