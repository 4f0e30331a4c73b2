// SPDX-License-Identifier: GPL-3.0-only
use log::info;
use pitp_shared::{Screen, SessionAction, SessionError, SessionStatus};

use super::Transition;

/// Switches between the readiness and live screens
#[derive(Debug, Clone, Default)]
pub struct ScreenNavigator {
    screen: Screen,
    occupancy: u64,
}

impl ScreenNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Number of times the live screen has been entered
    #[must_use]
    pub fn occupancy(&self) -> u64 {
        self.occupancy
    }

    /// Enter the live screen.
    ///
    /// # Errors
    ///
    /// Calling this when the session is not ready, or when already live, is a
    /// caller bug: the proceed affordance is only offered on a ready
    /// readiness screen.
    pub fn proceed_to_live(&mut self, status: SessionStatus) -> Result<Transition, SessionError> {
        let reason = if self.screen == Screen::Live {
            Some("already on the live screen")
        } else if !status.is_ready() {
            Some("session is not ready")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SessionError::PreconditionViolated {
                action: SessionAction::ProceedToLive,
                reason,
            });
        }

        self.screen = Screen::Live;
        self.occupancy += 1;
        info!("Entered live screen (occupancy {})", self.occupancy);
        Ok(Transition::Applied)
    }

    /// Return to the readiness screen. Always succeeds.
    pub fn go_back(&mut self) -> Transition {
        if self.screen == Screen::Readiness {
            return Transition::Unchanged;
        }
        self.screen = Screen::Readiness;
        info!("Left live screen (occupancy {})", self.occupancy);
        Transition::Applied
    }
}
