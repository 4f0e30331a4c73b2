// SPDX-License-Identifier: GPL-3.0-only
use log::trace;
use pitp_shared::IndicatorPhase;
use std::time::Duration;

use super::timers::{Scheduler, TimerKind, TimerToken};

/// Free-running 0, 1, 2 cycle, ticking only while its condition holds
#[derive(Debug, Clone)]
pub struct PendingIndicator {
    kind: TimerKind,
    interval: Duration,
    phase: IndicatorPhase,
    generation: u64,
    active: bool,
}

impl PendingIndicator {
    #[must_use]
    pub fn new(kind: TimerKind, interval: Duration) -> Self {
        Self {
            kind,
            interval,
            phase: IndicatorPhase::ZERO,
            generation: 0,
            active: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> IndicatorPhase {
        self.phase
    }

    /// Restart the cycle from phase 0 under `generation`
    pub fn activate(&mut self, generation: u64, scheduler: &mut impl Scheduler) {
        self.phase = IndicatorPhase::ZERO;
        self.generation = generation;
        self.active = true;
        scheduler.schedule(TimerToken::new(self.kind, generation), self.interval);
    }

    pub fn deactivate(&mut self, scheduler: &mut impl Scheduler) {
        scheduler.cancel(self.kind);
        self.active = false;
        self.phase = IndicatorPhase::ZERO;
    }

    /// Advance one phase. Returns `false` when the tick was stale and ignored.
    pub fn on_tick(&mut self, token: TimerToken, scheduler: &mut impl Scheduler) -> bool {
        if !self.active || token.kind != self.kind || token.generation != self.generation {
            trace!(
                "Discarding stale {} tick (generation {}, current {})",
                token.kind.as_ref(),
                token.generation,
                self.generation
            );
            return false;
        }

        self.phase = self.phase.next();
        scheduler.schedule(token, self.interval);
        true
    }
}
