// SPDX-License-Identifier: GPL-3.0-only
use std::time::Duration;
use strum_macros::{AsRefStr, EnumCount, EnumIter};

/// The logical timers the session core may have armed at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumCount, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TimerKind {
    /// One-shot readiness result for the current loading episode
    ReadinessProbe,
    ChecklistTick,
    /// Readiness screen "working..." dots
    PendingIndicator,
    /// Live screen "listening..." dots
    ListeningIndicator,
}

/// A scheduled callback, tagged with the generation of the episode or
/// occupancy that armed it. Callbacks whose generation no longer matches are
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

impl TimerToken {
    #[must_use]
    pub fn new(kind: TimerKind, generation: u64) -> Self {
        Self { kind, generation }
    }
}

/// Source of time for the session core.
///
/// At most one timer per [`TimerKind`] is pending: scheduling a kind that is
/// already armed replaces it. Implementations deliver a fired token back to
/// the core as `SessionInput::Timer`.
pub trait Scheduler {
    fn schedule(&mut self, token: TimerToken, after: Duration);

    fn cancel(&mut self, kind: TimerKind);

    fn is_scheduled(&self, kind: TimerKind) -> bool;
}
