//! Headless chase loop: a threat walks towards the agent while the controller evades.
use evasion::prelude::*;
use glam::Vec3;

use crate::world::{step_towards, ArenaWorld};

/// Parameters of a chase run.
#[derive(Debug, Clone)]
pub struct ChaseSettings {
    pub threat_start: Vec3,
    pub threat_speed: f32,
    /// The threat stops this close to the agent.
    pub threat_stop_distance: f32,
    pub ticks: usize,
    pub dt: f32,
}

impl Default for ChaseSettings {
    fn default() -> Self {
        Self {
            threat_start: Vec3::new(5.0, 0.0, 0.0),
            threat_speed: 1.5,
            threat_stop_distance: 2.0,
            ticks: 900,
            dt: 1.0 / 30.0,
        }
    }
}

/// Trails and the debug gizmos captured when the last target was chosen.
#[derive(Debug, Default)]
pub struct ChaseLog {
    pub agent_trail: Vec<Vec3>,
    pub threat_trail: Vec<Vec3>,
    pub last_selection_gizmos: Vec<DebugGizmo>,
    pub targets_chosen: usize,
}

pub fn run_chase(
    world: &mut ArenaWorld,
    controller: &mut EvasionController,
    settings: &ChaseSettings,
    sink: &mut dyn EventSink,
) -> ChaseLog {
    let mut log = ChaseLog::default();
    let mut threat = settings.threat_start;

    for _ in 0..settings.ticks {
        let previous_target = controller.target();
        {
            let ctx = TickContext::new(world.agent, Some(threat), &*world, &*world);
            controller.tick_with_events(&ctx, sink);
        }

        if controller.target().is_some() && controller.target() != previous_target {
            log.targets_chosen += 1;
            log.last_selection_gizmos = controller.debug_gizmos();
        }

        if let Some(directive) = controller.last_directive() {
            world.agent = step_towards(world.agent, directive, settings.dt);
        }
        if threat.distance(world.agent) > settings.threat_stop_distance {
            let chase = MoveDirective {
                destination: world.agent,
                speed: settings.threat_speed,
            };
            threat = step_towards(threat, chase, settings.dt);
        }

        log.agent_trail.push(world.agent);
        log.threat_trail.push(threat);
    }

    log
}
