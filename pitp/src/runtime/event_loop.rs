// SPDX-License-Identifier: GPL-3.0-only
use anyhow::{Result, anyhow};
use log::{debug, info};
use pitp_shared::{FacilityMode, ObserverBus, SessionAction, SessionSnapshot, UiLanguage};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::tokio_timers::TokioScheduler;
use crate::session::{ProbeOutcome, SessionCore, SessionInput, SessionTiming};

/// Messages accepted by the running session loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopMessage {
    Input(SessionInput),
    Shutdown,
}

/// Cloneable sender side of a running [`SessionRuntime`]
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<LoopMessage>,
}

impl SessionHandle {
    /// # Errors
    ///
    /// Returns an error if the session loop has stopped.
    pub fn send(&self, action: SessionAction) -> Result<()> {
        self.tx
            .send(LoopMessage::Input(SessionInput::Action(action)))
            .map_err(|_| anyhow!("Session loop is not running"))
    }

    /// Ask the loop to stop after the inputs already queued
    ///
    /// # Errors
    ///
    /// Returns an error if the session loop has already stopped.
    pub fn shutdown(&self) -> Result<()> {
        self.tx
            .send(LoopMessage::Shutdown)
            .map_err(|_| anyhow!("Session loop is not running"))
    }
}

/// Single-task event loop: timer ticks and user actions are applied to the
/// core one at a time, in arrival order
pub struct SessionRuntime {
    core: SessionCore<TokioScheduler>,
    inbox: mpsc::UnboundedReceiver<LoopMessage>,
    timers: mpsc::UnboundedReceiver<SessionInput>,
    handle: SessionHandle,
}

impl SessionRuntime {
    #[must_use]
    pub fn new(
        timing: SessionTiming,
        language: UiLanguage,
        facility: FacilityMode,
        probe: ProbeOutcome,
        bus: Arc<ObserverBus>,
    ) -> Self {
        let (timer_tx, timers) = mpsc::unbounded_channel();
        let (tx, inbox) = mpsc::unbounded_channel();

        let core = SessionCore::new(TokioScheduler::new(timer_tx), timing, bus)
            .with_language(language)
            .with_facility(facility)
            .with_probe(probe);

        Self {
            core,
            inbox,
            timers,
            handle: SessionHandle { tx },
        }
    }

    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Run until shutdown is requested or every [`SessionHandle`] is dropped.
    /// Returns the final snapshot.
    pub async fn run(self) -> SessionSnapshot {
        let Self {
            mut core,
            mut inbox,
            mut timers,
            handle,
        } = self;
        // Only caller handles may keep the inbox open
        drop(handle);

        core.start();
        info!("Session loop running");

        loop {
            let input = tokio::select! {
                // User actions first so a queued shutdown is not starved by ticks
                biased;
                message = inbox.recv() => match message {
                    Some(LoopMessage::Input(input)) => input,
                    Some(LoopMessage::Shutdown) => break,
                    None => {
                        info!("Every session handle dropped, stopping");
                        break;
                    }
                },
                Some(input) = timers.recv() => input,
            };

            // Rejections are logged by the core; the loop keeps running
            if let Err(e) = core.handle(input) {
                debug!("Input {input:?} rejected: {e}");
            }
        }

        core.scheduler_mut().cancel_all();
        info!("Session loop stopped");
        core.snapshot()
    }
}
