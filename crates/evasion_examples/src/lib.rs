#![forbid(unsafe_code)]

mod rendering;
mod sim;
mod world;

pub use rendering::{render_scene_to_png, RenderConfig, Scene};
pub use sim::{run_chase, ChaseLog, ChaseSettings};
pub use world::{step_towards, ArenaWorld, Pillar, AGENT_COLLIDER, AGENT_LAYER, PILLAR_LAYER};

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
