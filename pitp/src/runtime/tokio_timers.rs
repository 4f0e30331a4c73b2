// SPDX-License-Identifier: GPL-3.0-only
use log::trace;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::session::{Scheduler, SessionInput, TimerKind, TimerToken};

/// Scheduler backed by tokio timers.
///
/// Each armed timer is a task that sleeps and then posts its token into the
/// session input channel. Cancelling aborts the task, so a cancelled timer
/// never reaches the core.
pub struct TokioScheduler {
    inputs: mpsc::UnboundedSender<SessionInput>,
    handles: HashMap<TimerKind, JoinHandle<()>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(inputs: mpsc::UnboundedSender<SessionInput>) -> Self {
        Self {
            inputs,
            handles: HashMap::new(),
        }
    }

    /// Abort every pending timer
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, token: TimerToken, after: Duration) {
        self.cancel(token.kind);

        let inputs = self.inputs.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if inputs.send(SessionInput::Timer(token)).is_err() {
                trace!("Session loop gone, dropping {} tick", token.kind.as_ref());
            }
        });
        self.handles.insert(token.kind, handle);
    }

    fn cancel(&mut self, kind: TimerKind) {
        if let Some(handle) = self.handles.remove(&kind) {
            handle.abort();
        }
    }

    fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.handles
            .get(&kind)
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
