// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};

/// Number of distinct phases of a pending indicator
pub const PHASE_COUNT: u8 = 3;

/// Phase of a "working..." animation, cycling 0, 1, 2, 0, ...
///
/// Purely presentational; nothing else reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorPhase(u8);

impl IndicatorPhase {
    pub const ZERO: IndicatorPhase = IndicatorPhase(0);

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        IndicatorPhase((self.0 + 1) % PHASE_COUNT)
    }

    /// Dots to append to a "working" caption: one to three
    #[must_use]
    pub fn dots(self) -> &'static str {
        match self.0 {
            0 => ".",
            1 => "..",
            _ => "...",
        }
    }
}

impl std::fmt::Display for IndicatorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
