//! Event types and sinks for observing an [`crate::avoider::controller::EvasionController`].
//!
//! Pass a sink to [`crate::avoider::controller::EvasionController::tick_with_events`]
//! to receive [`EvasionEvent`]s as the state machine runs.
use glam::Vec3;

/// Describes what happened during a controller tick.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum EvasionEvent {
    /// The threat came within range and saw the agent.
    EvadeStarted {
        /// Threat position at entry.
        threat: Vec3,
        /// Threat distance at entry.
        distance: f32,
    },

    /// The threat left detection range.
    EvadeEnded {
        /// Whether the target survived the exit.
        kept_target: bool,
    },

    /// A resample cycle finished.
    ResampleCompleted {
        /// Raw samples translated into world space.
        sampled: usize,
        /// Samples that landed on a navigable surface.
        grounded: usize,
        /// Grounded samples hidden from the threat.
        valid: usize,
    },

    /// A new retreat target was chosen.
    TargetSelected {
        /// The chosen point.
        point: Vec3,
        /// Its distance to the threat.
        threat_distance: f32,
    },

    /// An existing target was kept on entry instead of resampling.
    TargetReused {
        /// The reused point.
        point: Vec3,
    },

    /// The threat can see the current target; it was dropped.
    TargetExposed {
        /// The dropped point.
        point: Vec3,
    },

    /// The agent arrived at its target.
    TargetReached {
        /// The reached point.
        point: Vec3,
    },

    /// Non-fatal warning.
    Warning {
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`EvasionEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvasionEventKind {
    EvadeStarted,
    EvadeEnded,
    ResampleCompleted,
    TargetSelected,
    TargetReused,
    TargetExposed,
    TargetReached,
    Warning,
}

impl EvasionEvent {
    pub fn kind(&self) -> EvasionEventKind {
        match self {
            EvasionEvent::EvadeStarted { .. } => EvasionEventKind::EvadeStarted,
            EvasionEvent::EvadeEnded { .. } => EvasionEventKind::EvadeEnded,
            EvasionEvent::ResampleCompleted { .. } => EvasionEventKind::ResampleCompleted,
            EvasionEvent::TargetSelected { .. } => EvasionEventKind::TargetSelected,
            EvasionEvent::TargetReused { .. } => EvasionEventKind::TargetReused,
            EvasionEvent::TargetExposed { .. } => EvasionEventKind::TargetExposed,
            EvasionEvent::TargetReached { .. } => EvasionEventKind::TargetReached,
            EvasionEvent::Warning { .. } => EvasionEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`EvasionEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: EvasionEvent);

    /// Whether events of `kind` should be built at all.
    #[inline]
    fn wants(&self, _kind: EvasionEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: EvasionEvent) {}

    #[inline]
    fn wants(&self, _kind: EvasionEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(EvasionEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(EvasionEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(EvasionEvent),
{
    #[inline]
    fn send(&mut self, event: EvasionEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<EvasionEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<EvasionEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[EvasionEvent] {
        &self.events
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: EvasionEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: EvasionEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_sinks(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: EvasionEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            if sink.wants(event.kind()) {
                sink.send(event.clone());
            }
        }
        if last.wants(event.kind()) {
            last.send(event);
        }
    }

    fn wants(&self, kind: EvasionEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
