// SPDX-License-Identifier: GPL-3.0-only
use log::info;
use pitp_shared::{SessionAction, SessionError, SessionStatus};

use super::Transition;

/// Owns the session status and the connectivity flag
#[derive(Debug, Clone)]
pub struct StatusController {
    status: SessionStatus,
    connection_lost: bool,
    episode: u64,
}

impl Default for StatusController {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusController {
    /// Starts in `Loading`, episode 1
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Loading,
            connection_lost: false,
            episode: 1,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn connection_lost(&self) -> bool {
        self.connection_lost
    }

    /// Current loading episode; bumped by every retry
    #[must_use]
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// # Errors
    ///
    /// Returns an error when called from `Error`: ready is only reachable
    /// through a new loading episode.
    pub fn signal_ready(&mut self) -> Result<Transition, SessionError> {
        match self.status {
            SessionStatus::Loading => {
                self.status = SessionStatus::Ready;
                info!("Episode {} ready", self.episode);
                Ok(Transition::Applied)
            }
            SessionStatus::Ready => Ok(Transition::Unchanged),
            SessionStatus::Error => Err(SessionError::InvalidTransition {
                from: self.status,
                action: SessionAction::SignalReady,
            }),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the session is already ready.
    pub fn signal_error(&mut self) -> Result<Transition, SessionError> {
        match self.status {
            SessionStatus::Loading => {
                self.status = SessionStatus::Error;
                info!("Episode {} failed", self.episode);
                Ok(Transition::Applied)
            }
            SessionStatus::Error => Ok(Transition::Unchanged),
            SessionStatus::Ready => Err(SessionError::InvalidTransition {
                from: self.status,
                action: SessionAction::SignalError,
            }),
        }
    }

    /// # Errors
    ///
    /// Returns an error unless the session is in `Error`.
    pub fn retry(&mut self) -> Result<Transition, SessionError> {
        if !self.status.is_error() {
            return Err(SessionError::InvalidTransition {
                from: self.status,
                action: SessionAction::Retry,
            });
        }
        self.status = SessionStatus::Loading;
        self.episode += 1;
        info!("Retrying, starting episode {}", self.episode);
        Ok(Transition::Applied)
    }

    pub fn report_connection_lost(&mut self) -> Transition {
        if self.connection_lost {
            return Transition::Unchanged;
        }
        self.connection_lost = true;
        info!("Secure link lost, voice interaction paused");
        Transition::Applied
    }

    pub fn acknowledge_connection_lost(&mut self) -> Transition {
        if !self.connection_lost {
            return Transition::Unchanged;
        }
        self.connection_lost = false;
        info!("Connection loss acknowledged");
        Transition::Applied
    }
}
