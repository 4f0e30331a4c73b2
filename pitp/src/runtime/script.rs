// SPDX-License-Identifier: GPL-3.0-only

//! Scripted walk-through of a whole session on the virtual clock.

use log::info;
use pitp_shared::{
    FacilityMode, ObserverBus, SessionAction, SessionError, SessionSnapshot, UiLanguage,
};
use std::sync::Arc;
use std::time::Duration;

use super::virtual_clock::VirtualScheduler;
use crate::session::{ProbeOutcome, SessionCore, SessionTiming};

/// One captured moment of the walk-through
#[derive(Debug, Clone)]
pub struct ScriptStep {
    pub label: &'static str,
    /// Virtual time since the session started
    pub at: Duration,
    pub snapshot: SessionSnapshot,
}

struct Recorder {
    core: SessionCore<VirtualScheduler>,
    steps: Vec<ScriptStep>,
}

impl Recorder {
    fn capture(&mut self, label: &'static str) {
        let snapshot = self.core.snapshot();
        info!(
            "[{label}] status={} screen={} checklist={}/{} timers={}",
            snapshot.status,
            snapshot.screen,
            snapshot.checklist_completed(),
            snapshot.checklist.len(),
            self.core.scheduler().pending_count()
        );
        self.steps.push(ScriptStep {
            label,
            at: self.core.scheduler().now(),
            snapshot,
        });
    }

    fn act(&mut self, action: SessionAction, label: &'static str) -> Result<(), SessionError> {
        self.core.handle(action)?;
        self.capture(label);
        Ok(())
    }

    fn wait(&mut self, duration: Duration, label: &'static str) {
        self.core.advance_by(duration);
        self.capture(label);
    }
}

/// Drive a session from loading to a second live occupancy.
///
/// With [`ProbeOutcome::Error`] the first episode fails, is retried, and the
/// retried episode succeeds.
///
/// # Errors
///
/// Returns an error if the core rejects a scripted action.
pub fn walkthrough(
    timing: SessionTiming,
    language: UiLanguage,
    facility: FacilityMode,
    probe: ProbeOutcome,
) -> Result<Vec<ScriptStep>, SessionError> {
    timing.validate()?;

    let core = SessionCore::new(
        VirtualScheduler::new(),
        timing,
        Arc::new(ObserverBus::default()),
    )
    .with_language(language)
    .with_facility(facility)
    .with_probe(probe);
    let mut rec = Recorder {
        core,
        steps: Vec::new(),
    };

    rec.core.start();
    rec.capture("loading");
    rec.wait(timing.readiness_delay / 2, "preparing");

    if probe == ProbeOutcome::Error {
        rec.wait(timing.readiness_delay, "probe failed");
        rec.core.set_probe(ProbeOutcome::Ready);
        rec.act(SessionAction::Retry, "retry")?;
        rec.wait(timing.readiness_delay / 2, "preparing again");
    }

    rec.wait(timing.readiness_delay, "ready");
    rec.act(SessionAction::ProceedToLive, "live")?;
    rec.act(SessionAction::Reveal, "speak")?;
    rec.wait(timing.indicator_tick * 2, "listening");
    rec.act(SessionAction::ReportConnectionLost, "connection lost")?;
    rec.act(SessionAction::AcknowledgeConnectionLost, "acknowledged")?;
    rec.act(SessionAction::ToggleLanguage, "language toggled")?;
    rec.act(SessionAction::GoBack, "back")?;
    rec.act(SessionAction::ProceedToLive, "live again")?;

    Ok(rec.steps)
}
