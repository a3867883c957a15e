//! Per-agent evasion state machine.
//!
//! Each tick the controller faces the threat, updates an `Idle`/`Evading`
//! state keyed on "threat in range and sees the agent", resamples retreat
//! candidates on entry, drops a target the threat can see, and issues a move
//! directive.
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::avoider::config::EvasionConfig;
use crate::avoider::events::{EventSink, EvasionEvent, EvasionEventKind};
use crate::avoider::geometry::sample_to_world;
use crate::avoider::oracle::{Mover, NavigationOracle, Raycaster};
use crate::avoider::selection::pick_farthest;
use crate::avoider::visibility::{first_hit_is, point_visible};
use crate::error::Result;
use crate::sampling::{PoissonDiskSampling, PositionSampling};

/// World state borrowed for one tick.
pub struct TickContext<'a> {
    /// Current agent position.
    pub agent_position: Vec3,
    /// Current threat position, if there is a threat.
    pub threat_position: Option<Vec3>,
    /// Walkability queries.
    pub navigation: &'a dyn NavigationOracle,
    /// Ray queries.
    pub raycaster: &'a dyn Raycaster,
}

impl<'a> TickContext<'a> {
    pub fn new(
        agent_position: Vec3,
        threat_position: Option<Vec3>,
        navigation: &'a dyn NavigationOracle,
        raycaster: &'a dyn Raycaster,
    ) -> Self {
        Self {
            agent_position,
            threat_position,
            navigation,
            raycaster,
        }
    }
}

/// Movement directive issued at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDirective {
    pub destination: Vec3,
    pub speed: f32,
}

/// What a [`DebugGizmo`] marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoRole {
    /// Raw sample in world space.
    Sampled,
    /// Grounded and hidden candidate.
    Valid,
    /// Current target.
    Target,
}

/// Sphere to draw for debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugGizmo {
    pub position: Vec3,
    pub radius: f32,
    pub role: GizmoRole,
}

pub struct EvasionController {
    config: EvasionConfig,
    sampling: PoissonDiskSampling,
    mover: Box<dyn Mover>,
    degraded: bool,
    degraded_reported: bool,
    rng: StdRng,
    evading: bool,
    target: Option<Vec3>,
    valid_candidates: Vec<Vec3>,
    all_sampled: Vec<Vec3>,
    last_directive: Option<MoveDirective>,
}

impl EvasionController {
    /// Creates a controller after validating `config`.
    pub fn try_new(config: EvasionConfig, mover: Option<Box<dyn Mover>>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, mover))
    }

    /// Creates a controller. Without a mover it runs in a no-op movement mode.
    pub fn new(config: EvasionConfig, mover: Option<Box<dyn Mover>>) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid evasion config: {config:?}"
        );
        Self::build(config, mover)
    }

    fn build(config: EvasionConfig, mover: Option<Box<dyn Mover>>) -> Self {
        let degraded = mover.is_none();
        if degraded {
            warn!("Evasion controller has no mover; movement directives will be dropped.");
        }
        let sampling = PoissonDiskSampling::new(config.min_separation)
            .with_attempts(config.sample_attempts)
            .with_pick(config.active_pick);

        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            sampling,
            mover: mover.unwrap_or_else(|| Box::new(())),
            degraded,
            degraded_reported: false,
            evading: false,
            target: None,
            valid_candidates: Vec::new(),
            all_sampled: Vec::new(),
            last_directive: None,
        }
    }

    pub fn config(&self) -> &EvasionConfig {
        &self.config
    }

    pub fn is_evading(&self) -> bool {
        self.evading
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn valid_candidates(&self) -> &[Vec3] {
        &self.valid_candidates
    }

    pub fn all_sampled(&self) -> &[Vec3] {
        &self.all_sampled
    }

    pub fn last_directive(&self) -> Option<MoveDirective> {
        self.last_directive
    }

    /// Drops the target and candidates and returns to idle.
    pub fn reset(&mut self) {
        self.evading = false;
        self.clear_commitment();
    }

    /// Advances the controller by one tick.
    pub fn tick(&mut self, ctx: &TickContext<'_>) {
        self.tick_with_events(ctx, &mut ());
    }

    /// Advances the controller by one tick, reporting to `sink`.
    pub fn tick_with_events(&mut self, ctx: &TickContext<'_>, sink: &mut dyn EventSink) {
        if self.degraded && !self.degraded_reported {
            self.degraded_reported = true;
            if sink.wants(EvasionEventKind::Warning) {
                sink.send(EvasionEvent::Warning {
                    message: "no mover configured; running without movement".into(),
                });
            }
        }

        if let Some(threat) = ctx.threat_position {
            self.mover.face_towards(threat);
        }

        let distance = ctx
            .threat_position
            .map(|threat| threat.distance(ctx.agent_position));
        let in_range = distance.is_some_and(|d| d < self.config.detection_range);

        match (self.evading, ctx.threat_position) {
            (false, Some(threat)) if in_range && self.threat_sees_agent(ctx, threat) => {
                self.enter(ctx, threat, distance.unwrap_or_default(), sink);
            }
            (true, _) if !in_range => self.exit(sink),
            _ => {}
        }

        self.drop_exposed_target(ctx, sink);
        self.check_arrival(ctx, sink);
        self.issue_directive(ctx);
    }

    fn threat_sees_agent(&self, ctx: &TickContext<'_>, threat: Vec3) -> bool {
        first_hit_is(
            ctx.raycaster,
            threat,
            ctx.agent_position,
            self.config.agent_collider,
        )
    }

    fn enter(
        &mut self,
        ctx: &TickContext<'_>,
        threat: Vec3,
        distance: f32,
        sink: &mut dyn EventSink,
    ) {
        self.evading = true;
        info!("Threat spotted the agent at distance {distance:.2}; evading.");
        if sink.wants(EvasionEventKind::EvadeStarted) {
            sink.send(EvasionEvent::EvadeStarted { threat, distance });
        }

        if let Some(point) = self.target {
            debug!("Reusing retreat target {point}.");
            if sink.wants(EvasionEventKind::TargetReused) {
                sink.send(EvasionEvent::TargetReused { point });
            }
            return;
        }

        self.resample(ctx, threat, sink);
        self.target = pick_farthest(&self.valid_candidates, threat);
        match self.target {
            Some(point) => {
                let threat_distance = point.distance(threat);
                info!("Retreating to {point} ({threat_distance:.2} from threat).");
                if sink.wants(EvasionEventKind::TargetSelected) {
                    sink.send(EvasionEvent::TargetSelected {
                        point,
                        threat_distance,
                    });
                }
            }
            None => info!("No hidden, navigable retreat point found."),
        }
    }

    fn resample(&mut self, ctx: &TickContext<'_>, threat: Vec3, sink: &mut dyn EventSink) {
        let extent = Vec2::splat(self.config.area_size);
        let samples = self.sampling.generate(extent.into(), &mut self.rng);

        self.all_sampled.clear();
        self.valid_candidates.clear();
        let mut grounded = 0;

        for sample in samples {
            let world = sample_to_world(Vec2::from(sample), extent, ctx.agent_position);
            self.all_sampled.push(world);

            let Some(ground) = ctx
                .navigation
                .project_to_navigable(world, self.config.ground_search_radius)
            else {
                continue;
            };
            grounded += 1;

            let candidate = ground + Vec3::Y * self.config.ground_offset;
            if point_visible(ctx.raycaster, threat, candidate, self.config.agent_layers) {
                continue;
            }
            self.valid_candidates.push(candidate);
        }

        debug!(
            "Resampled {} points: {} grounded, {} hidden.",
            self.all_sampled.len(),
            grounded,
            self.valid_candidates.len()
        );
        if sink.wants(EvasionEventKind::ResampleCompleted) {
            sink.send(EvasionEvent::ResampleCompleted {
                sampled: self.all_sampled.len(),
                grounded,
                valid: self.valid_candidates.len(),
            });
        }
    }

    fn exit(&mut self, sink: &mut dyn EventSink) {
        self.evading = false;
        self.valid_candidates.clear();
        self.all_sampled.clear();
        if !self.config.keep_target_on_exit {
            self.target = None;
        }

        let kept_target = self.target.is_some();
        info!("Threat out of range; evasion ended (target kept: {kept_target}).");
        if sink.wants(EvasionEventKind::EvadeEnded) {
            sink.send(EvasionEvent::EvadeEnded { kept_target });
        }
    }

    fn drop_exposed_target(&mut self, ctx: &TickContext<'_>, sink: &mut dyn EventSink) {
        let (Some(point), Some(threat)) = (self.target, ctx.threat_position) else {
            return;
        };
        if !point_visible(ctx.raycaster, threat, point, self.config.agent_layers) {
            return;
        }

        debug!("Retreat target {point} is exposed; dropping it.");
        self.reset();
        if sink.wants(EvasionEventKind::TargetExposed) {
            sink.send(EvasionEvent::TargetExposed { point });
        }
    }

    fn check_arrival(&mut self, ctx: &TickContext<'_>, sink: &mut dyn EventSink) {
        let Some(point) = self.target else {
            return;
        };
        if ctx.agent_position.distance(point) > self.config.arrival_tolerance {
            return;
        }

        debug!("Reached retreat target {point}.");
        self.target = None;
        if sink.wants(EvasionEventKind::TargetReached) {
            sink.send(EvasionEvent::TargetReached { point });
        }
    }

    fn issue_directive(&mut self, ctx: &TickContext<'_>) {
        let directive = match self.target {
            Some(destination) => MoveDirective {
                destination,
                speed: self.config.speed,
            },
            None => MoveDirective {
                destination: ctx.agent_position,
                speed: 0.0,
            },
        };
        self.mover.set_destination(directive.destination);
        self.mover.set_speed(directive.speed);
        self.last_directive = Some(directive);
    }

    fn clear_commitment(&mut self) {
        self.target = None;
        self.valid_candidates.clear();
        self.all_sampled.clear();
    }

    /// Spheres for the sampled points, valid candidates and target.
    ///
    /// Empty unless `debug_visualization` is enabled.
    pub fn debug_gizmos(&self) -> Vec<DebugGizmo> {
        if !self.config.debug_visualization {
            return Vec::new();
        }

        let point_radius = self.config.min_separation * 0.25;
        let sampled = self.all_sampled.iter().map(|&position| DebugGizmo {
            position,
            radius: point_radius,
            role: GizmoRole::Sampled,
        });
        let valid = self.valid_candidates.iter().map(|&position| DebugGizmo {
            position,
            radius: point_radius,
            role: GizmoRole::Valid,
        });
        let target = self.target.map(|position| DebugGizmo {
            position,
            radius: self.config.arrival_tolerance,
            role: GizmoRole::Target,
        });

        sampled.chain(valid).chain(target).collect()
    }
}
