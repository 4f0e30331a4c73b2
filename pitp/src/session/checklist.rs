// SPDX-License-Identifier: GPL-3.0-only
use log::{debug, trace};
use pitp_shared::Checklist;
use std::time::Duration;

use super::timers::{Scheduler, TimerKind, TimerToken};

/// Completes one readiness step per tick while the session is loading
#[derive(Debug, Clone)]
pub struct ChecklistProgress {
    checklist: Checklist,
    tick: Duration,
    generation: u64,
    running: bool,
}

impl ChecklistProgress {
    #[must_use]
    pub fn new(tick: Duration) -> Self {
        Self {
            checklist: Checklist::new(),
            tick,
            generation: 0,
            running: false,
        }
    }

    #[must_use]
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Begin a fresh fill for loading episode `generation`
    pub fn start(&mut self, generation: u64, scheduler: &mut impl Scheduler) {
        self.checklist.reset();
        self.generation = generation;
        self.running = !self.checklist.is_empty();
        if self.running {
            scheduler.schedule(TimerToken::new(TimerKind::ChecklistTick, generation), self.tick);
        }
        debug!("Checklist restarted for episode {generation}");
    }

    /// Status became ready: every step shows complete regardless of ticks
    pub fn finish(&mut self, scheduler: &mut impl Scheduler) {
        scheduler.cancel(TimerKind::ChecklistTick);
        self.running = false;
        self.checklist.complete_all();
    }

    /// Status became error: stop ticking and clear progress
    pub fn abort(&mut self, scheduler: &mut impl Scheduler) {
        scheduler.cancel(TimerKind::ChecklistTick);
        self.running = false;
        self.checklist.reset();
    }

    /// Apply a tick. Returns `false` when the tick was stale and ignored.
    pub fn on_tick(&mut self, token: TimerToken, scheduler: &mut impl Scheduler) -> bool {
        if !self.running || token.generation != self.generation {
            trace!(
                "Discarding stale checklist tick (generation {}, current {})",
                token.generation, self.generation
            );
            return false;
        }

        if let Some(index) = self.checklist.complete_next() {
            debug!("Checklist step {index}/{} complete", self.checklist.len());
        }

        if self.checklist.is_complete() {
            self.running = false;
        } else {
            scheduler.schedule(token, self.tick);
        }
        true
    }
}
