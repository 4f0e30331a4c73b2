// SPDX-License-Identifier: GPL-3.0-only
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::facility::FacilityMode;
use crate::models::indicator::IndicatorPhase;
use crate::models::language::{TextDirection, UiLanguage};
use crate::models::screen::Screen;
use crate::models::status::SessionStatus;

/// Every observable the session core exposes, captured after one transition
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Monotonic counter of applied transitions
    pub sequence: u64,
    pub status: SessionStatus,
    /// Loading episode the status belongs to
    pub episode: u64,
    pub checklist: Vec<bool>,
    pub pending_phase: IndicatorPhase,
    pub screen: Screen,
    /// Live screen occupancy; bumped on every entry to `Screen::Live`
    pub occupancy: u64,
    pub revealed: bool,
    pub listening_phase: IndicatorPhase,
    pub language: UiLanguage,
    pub direction: TextDirection,
    pub connection_lost: bool,
    pub facility: FacilityMode,
    pub taken_at: DateTime<Utc>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn checklist_completed(&self) -> usize {
        self.checklist.iter().take_while(|done| **done).count()
    }

    /// The "start translation session" affordance
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.screen == Screen::Readiness && self.status.is_ready()
    }

    /// The "retry connection" affordance
    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.screen == Screen::Readiness && self.status.is_error()
    }

    #[must_use]
    pub fn shows_back(&self) -> bool {
        self.screen == Screen::Live
    }

    /// Lanes and session controls (export, clear, flag, notes)
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.screen == Screen::Live && self.revealed
    }

    /// Voice interaction is paused while the secure link is down
    #[must_use]
    pub fn voice_paused(&self) -> bool {
        self.connection_lost
    }
}
