// SPDX-License-Identifier: GPL-3.0-only
use log::trace;
use std::collections::HashMap;
use std::time::Duration;

use crate::session::{Scheduler, SessionCore, SessionInput, TimerKind, TimerToken};

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: Duration,
    /// Scheduling order, breaks ties between timers due at the same instant
    order: u64,
    token: TimerToken,
}

/// Deterministic scheduler driven by an explicit virtual clock
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_order: u64,
    pending: HashMap<TimerKind, PendingTimer>,
}

impl VirtualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the earliest timer due at or before `deadline`,
    /// moving the clock to its due time
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerToken> {
        let timer = *self
            .pending
            .values()
            .filter(|timer| timer.due <= deadline)
            .min_by_key(|timer| (timer.due, timer.order))?;
        self.pending.remove(&timer.token.kind);
        self.now = self.now.max(timer.due);
        Some(timer.token)
    }

    fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, token: TimerToken, after: Duration) {
        let timer = PendingTimer {
            due: self.now + after,
            order: self.next_order,
            token,
        };
        self.next_order += 1;
        trace!(
            "Armed {} (generation {}) for t={:?}",
            token.kind.as_ref(),
            token.generation,
            timer.due
        );
        self.pending.insert(token.kind, timer);
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.pending.remove(&kind);
    }

    fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }
}

impl SessionCore<VirtualScheduler> {
    /// Fire every timer that comes due within the next `duration`, one event
    /// at a time and in time order. Returns the number of timers fired.
    pub fn advance_by(&mut self, duration: Duration) -> usize {
        let deadline = self.scheduler().now() + duration;
        self.advance_to(deadline)
    }

    /// Fire every timer due at or before the absolute virtual time `deadline`
    pub fn advance_to(&mut self, deadline: Duration) -> usize {
        let mut fired = 0;
        while let Some(token) = self.scheduler_mut().pop_due(deadline) {
            // Stale or rejected ticks are logged by the core
            let _ = self.handle(SessionInput::Timer(token));
            fired += 1;
        }
        self.scheduler_mut().settle(deadline);
        fired
    }

    #[cfg(test)]
    pub fn advance_ms(&mut self, millis: u64) -> usize {
        self.advance_by(Duration::from_millis(millis))
    }
}
