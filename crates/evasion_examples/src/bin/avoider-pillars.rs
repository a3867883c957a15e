use evasion::prelude::*;
use evasion_examples::{
    init_tracing, render_scene_to_png, run_chase, ArenaWorld, ChaseSettings, Pillar, RenderConfig,
    Scene, AGENT_COLLIDER, AGENT_LAYER,
};
use glam::Vec3;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut world = ArenaWorld::new(
        20.0,
        vec![
            Pillar::new(-6.0, 4.0, 1.5),
            Pillar::new(-9.0, -7.0, 2.0),
            Pillar::new(4.0, -10.0, 1.2),
            Pillar::new(8.0, 9.0, 1.8),
            Pillar::new(-14.0, 12.0, 1.0),
        ],
    );

    let config = EvasionConfig::new(AGENT_COLLIDER, AGENT_LAYER)
        .with_detection_range(7.5)
        .with_area_size(32.0)
        .with_min_separation(2.0)
        .with_seed(42)
        .with_debug_visualization(true);
    let mut controller = EvasionController::try_new(config, Some(Box::new(())))?;

    let mut events = VecSink::new();
    let log = run_chase(
        &mut world,
        &mut controller,
        &ChaseSettings {
            threat_start: Vec3::new(5.0, 0.0, 0.0),
            ..Default::default()
        },
        &mut events,
    );

    tracing::info!(
        "Chase finished: {} targets chosen, {} exposed, {} reached",
        log.targets_chosen,
        events.count(EvasionEventKind::TargetExposed),
        events.count(EvasionEventKind::TargetReached),
    );

    let scene = Scene {
        world: Some(&world),
        gizmos: log.last_selection_gizmos,
        agent_trail: log.agent_trail,
        threat_trail: log.threat_trail,
        ..Default::default()
    };
    let render = RenderConfig::new((900, 900), world.half_extent);
    render_scene_to_png(&scene, &render, "avoider-pillars.png")
}
