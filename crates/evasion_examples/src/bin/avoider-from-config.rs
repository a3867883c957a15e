use std::fs;

use anyhow::Context;
use evasion::prelude::*;
use evasion_examples::{
    init_tracing, run_chase, ArenaWorld, ChaseSettings, Pillar, AGENT_COLLIDER, AGENT_LAYER,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = format!("{}/assets/avoider.ron", env!("CARGO_MANIFEST_DIR"));
    let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let mut config: EvasionConfig =
        ron::from_str(&text).with_context(|| format!("parsing {path}"))?;
    // The arena owns collider identities.
    config.agent_collider = AGENT_COLLIDER;
    config.agent_layers = AGENT_LAYER;
    config.validate()?;

    let mut world = ArenaWorld::new(
        16.0,
        vec![Pillar::new(-5.0, 3.0, 1.5), Pillar::new(-4.0, -6.0, 2.0)],
    );
    let mut controller = EvasionController::new(config, None);

    let mut sink = FnSink::new(|event: EvasionEvent| tracing::info!(?event, "evasion"));
    let log = run_chase(
        &mut world,
        &mut controller,
        &ChaseSettings {
            ticks: 300,
            ..Default::default()
        },
        &mut sink,
    );

    tracing::info!(
        "Agent ended at {} after choosing {} targets",
        world.agent,
        log.targets_chosen
    );
    Ok(())
}
