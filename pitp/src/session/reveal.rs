// SPDX-License-Identifier: GPL-3.0-only
use log::info;

use super::Transition;

/// Gates the conversation lanes behind a one-shot "speak" per live occupancy
#[derive(Debug, Clone, Default)]
pub struct ConversationReveal {
    revealed: bool,
    occupancy: u64,
}

impl ConversationReveal {
    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn occupancy(&self) -> u64 {
        self.occupancy
    }

    /// Fresh state for live occupancy `occupancy`
    pub fn enter(&mut self, occupancy: u64) {
        self.occupancy = occupancy;
        self.revealed = false;
    }

    /// Live screen torn down
    pub fn discard(&mut self) {
        self.revealed = false;
    }

    /// Idempotent: a second call is a no-op
    pub fn reveal(&mut self) -> Transition {
        if self.revealed {
            return Transition::Unchanged;
        }
        self.revealed = true;
        info!("Conversation revealed (occupancy {})", self.occupancy);
        Transition::Applied
    }
}
