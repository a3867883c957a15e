#![forbid(unsafe_code)]
//! evasion: NPC retreat behaviour built on Poisson disk sampling.
//!
//! Modules:
//! - sampling: blue-noise candidate generation (Poisson disk with an active list)
//! - avoider: controller state machine, collaborator traits, visibility helpers, selection, events
//!
//! The controller is driven by the host through [`avoider::controller::EvasionController::tick`].
pub mod avoider;
pub mod error;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use evasion::prelude::*;`.
pub mod prelude {
    pub use crate::avoider::config::{EvasionConfig, ARRIVAL_TOLERANCE, GROUND_SEARCH_RADIUS};
    pub use crate::avoider::controller::{
        DebugGizmo, EvasionController, GizmoRole, MoveDirective, TickContext,
    };
    pub use crate::avoider::events::{
        EventSink, EvasionEvent, EvasionEventKind, FnSink, MultiSink, VecSink,
    };
    pub use crate::avoider::geometry::{ray_between, region_origin, sample_to_world};
    pub use crate::avoider::oracle::{
        ColliderId, LayerSet, Mover, NavigationOracle, RayHit, Raycaster,
    };
    pub use crate::avoider::selection::pick_farthest;
    pub use crate::avoider::visibility::{first_hit_is, point_visible};
    pub use crate::error::{Error, Result};
    pub use crate::sampling::{ActivePick, PoissonDiskSampling, PositionSampling};
}
