// SPDX-License-Identifier: GPL-3.0-only

//! Session readiness lifecycle.
//!
//! [`SessionCore`] is the single mutation entry point. It composes the status
//! controller, the checklist timer, both pending indicators, the screen
//! navigator and the conversation reveal, and publishes one snapshot per
//! applied transition.

pub mod checklist;
pub mod indicator;
pub mod machine;
pub mod navigator;
pub mod reveal;
pub mod status;
pub mod timers;

#[cfg(test)]
mod machine_test;

use pitp_shared::{SessionAction, SessionError};
use std::time::Duration;

pub use checklist::ChecklistProgress;
pub use indicator::PendingIndicator;
pub use machine::SessionCore;
pub use navigator::ScreenNavigator;
pub use reveal::ConversationReveal;
pub use status::StatusController;
pub use timers::{Scheduler, TimerKind, TimerToken};

/// Outcome of an accepted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed; a snapshot was published
    Applied,
    /// Idempotent no-op or stale timer
    Unchanged,
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Transition::Applied
    }
}

/// Everything the core reacts to, processed one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Action(SessionAction),
    Timer(TimerToken),
}

impl From<SessionAction> for SessionInput {
    fn from(action: SessionAction) -> Self {
        SessionInput::Action(action)
    }
}

/// What the readiness probe reports when its delay elapses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeOutcome {
    #[default]
    Ready,
    Error,
}

/// Cadence of the session timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub readiness_delay: Duration,
    pub checklist_tick: Duration,
    pub indicator_tick: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            readiness_delay: Duration::from_millis(2500),
            checklist_tick: Duration::from_millis(400),
            indicator_tick: Duration::from_millis(500),
        }
    }
}

impl SessionTiming {
    /// # Errors
    ///
    /// Returns an error if any interval is zero.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.readiness_delay.is_zero() {
            return Err(SessionError::InvalidTiming {
                field: "readiness_delay",
            });
        }
        if self.checklist_tick.is_zero() {
            return Err(SessionError::InvalidTiming {
                field: "checklist_tick",
            });
        }
        if self.indicator_tick.is_zero() {
            return Err(SessionError::InvalidTiming {
                field: "indicator_tick",
            });
        }
        Ok(())
    }
}
