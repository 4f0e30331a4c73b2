// SPDX-License-Identifier: GPL-3.0-only
use chrono::Utc;
use log::{debug, error, info, trace, warn};
use pitp_shared::{
    Checklist, FacilityMode, IndicatorPhase, ObserverBus, Screen, SessionAction, SessionError,
    SessionSnapshot, SessionStatus, TextDirection, UiLanguage,
};
use std::sync::Arc;

use super::checklist::ChecklistProgress;
use super::indicator::PendingIndicator;
use super::navigator::ScreenNavigator;
use super::reveal::ConversationReveal;
use super::status::StatusController;
use super::timers::{Scheduler, TimerKind, TimerToken};
use super::{ProbeOutcome, SessionInput, SessionTiming, Transition};

/// The session state machine.
///
/// Every input goes through [`SessionCore::handle`]; every applied transition
/// resynchronises the timers it affects before the snapshot is published, so
/// no animator ever ticks with state from a previous status.
pub struct SessionCore<S: Scheduler> {
    scheduler: S,
    timing: SessionTiming,
    probe: ProbeOutcome,
    status: StatusController,
    checklist: ChecklistProgress,
    pending: PendingIndicator,
    listening: PendingIndicator,
    navigator: ScreenNavigator,
    reveal: ConversationReveal,
    language: UiLanguage,
    facility: FacilityMode,
    sequence: u64,
    started: bool,
    /// Loading episode whose timers were last armed
    armed_episode: Option<u64>,
    bus: Arc<ObserverBus>,
}

impl<S: Scheduler> SessionCore<S> {
    #[must_use]
    pub fn new(scheduler: S, timing: SessionTiming, bus: Arc<ObserverBus>) -> Self {
        Self {
            scheduler,
            timing,
            probe: ProbeOutcome::default(),
            status: StatusController::new(),
            checklist: ChecklistProgress::new(timing.checklist_tick),
            pending: PendingIndicator::new(TimerKind::PendingIndicator, timing.indicator_tick),
            listening: PendingIndicator::new(TimerKind::ListeningIndicator, timing.indicator_tick),
            navigator: ScreenNavigator::new(),
            reveal: ConversationReveal::default(),
            language: UiLanguage::default(),
            facility: FacilityMode::default(),
            sequence: 0,
            started: false,
            armed_episode: None,
            bus,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: UiLanguage) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_facility(mut self, facility: FacilityMode) -> Self {
        self.facility = facility;
        self
    }

    #[must_use]
    pub fn with_probe(mut self, probe: ProbeOutcome) -> Self {
        self.probe = probe;
        self
    }

    /// Outcome reported by the next readiness probe to fire
    pub fn set_probe(&mut self, probe: ProbeOutcome) {
        self.probe = probe;
    }

    /// Arm the loading episode and publish the initial snapshot.
    ///
    /// Inputs handled before `start` are kept: a session already resolved to
    /// ready or error is published as is, and an episode armed by a retry is
    /// not restarted. Calling it again has no effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            "Session starting: readiness in {:?}, checklist tick {:?}, indicator tick {:?}",
            self.timing.readiness_delay, self.timing.checklist_tick, self.timing.indicator_tick
        );
        let episode = self.status.episode();
        if self.status.status().is_loading() && self.armed_episode != Some(episode) {
            self.enter_loading();
        }
        self.publish();
    }

    /// Process one input atomically.
    ///
    /// # Errors
    ///
    /// Returns an error for transitions the current state does not allow and
    /// for precondition violations by the caller. State is untouched when an
    /// error is returned.
    pub fn handle(&mut self, input: impl Into<SessionInput>) -> Result<Transition, SessionError> {
        let input = input.into();
        let result = match input {
            SessionInput::Action(action) => self.apply_action(action),
            SessionInput::Timer(token) => Ok(self.apply_timer(token)),
        };

        match &result {
            Ok(Transition::Applied) => self.publish(),
            Ok(Transition::Unchanged) => {}
            Err(e) if matches!(e, SessionError::PreconditionViolated { .. }) => error!("{e}"),
            Err(e) => warn!("{e}"),
        }
        result
    }

    fn apply_action(&mut self, action: SessionAction) -> Result<Transition, SessionError> {
        debug!("Handling action {action}");

        if self.status.connection_lost() && blocked_by_overlay(action) {
            return Err(SessionError::PreconditionViolated {
                action,
                reason: "connection-lost overlay is showing",
            });
        }

        match action {
            SessionAction::SignalReady => self.signal_ready(),
            SessionAction::SignalError => self.signal_error(),
            SessionAction::Retry => {
                let transition = self.status.retry()?;
                self.enter_loading();
                Ok(transition)
            }
            SessionAction::ReportConnectionLost => Ok(self.status.report_connection_lost()),
            SessionAction::AcknowledgeConnectionLost => {
                Ok(self.status.acknowledge_connection_lost())
            }
            SessionAction::ProceedToLive => {
                let transition = self.navigator.proceed_to_live(self.status.status())?;
                self.reveal.enter(self.navigator.occupancy());
                self.listening.deactivate(&mut self.scheduler);
                Ok(transition)
            }
            SessionAction::GoBack => {
                let transition = self.navigator.go_back();
                if transition.is_applied() {
                    self.reveal.discard();
                    self.listening.deactivate(&mut self.scheduler);
                }
                Ok(transition)
            }
            SessionAction::Reveal => {
                if self.navigator.screen() != Screen::Live {
                    return Err(SessionError::PreconditionViolated {
                        action,
                        reason: "conversation can only be revealed on the live screen",
                    });
                }
                let transition = self.reveal.reveal();
                if transition.is_applied() {
                    self.listening
                        .activate(self.navigator.occupancy(), &mut self.scheduler);
                }
                Ok(transition)
            }
            SessionAction::ToggleLanguage => {
                self.language = self.language.toggled();
                info!("UI language switched to {}", self.language);
                Ok(Transition::Applied)
            }
        }
    }

    fn signal_ready(&mut self) -> Result<Transition, SessionError> {
        let transition = self.status.signal_ready()?;
        if transition.is_applied() {
            self.leave_loading();
            self.checklist.finish(&mut self.scheduler);
        }
        Ok(transition)
    }

    fn signal_error(&mut self) -> Result<Transition, SessionError> {
        let transition = self.status.signal_error()?;
        if transition.is_applied() {
            self.leave_loading();
            self.checklist.abort(&mut self.scheduler);
        }
        Ok(transition)
    }

    fn apply_timer(&mut self, token: TimerToken) -> Transition {
        let applied = match token.kind {
            TimerKind::ReadinessProbe => return self.apply_probe(token),
            TimerKind::ChecklistTick => self.checklist.on_tick(token, &mut self.scheduler),
            TimerKind::PendingIndicator => self.pending.on_tick(token, &mut self.scheduler),
            TimerKind::ListeningIndicator => {
                token.generation == self.navigator.occupancy()
                    && self.listening.on_tick(token, &mut self.scheduler)
            }
        };

        if applied {
            Transition::Applied
        } else {
            Transition::Unchanged
        }
    }

    fn apply_probe(&mut self, token: TimerToken) -> Transition {
        if token.generation != self.status.episode() || !self.status.status().is_loading() {
            trace!(
                "Discarding stale readiness probe (episode {}, current {})",
                token.generation,
                self.status.episode()
            );
            return Transition::Unchanged;
        }

        let result = match self.probe {
            ProbeOutcome::Ready => self.signal_ready(),
            ProbeOutcome::Error => self.signal_error(),
        };
        // Loading is the only state the probe acts in, so neither call can fail
        result.unwrap_or(Transition::Unchanged)
    }

    /// A new loading episode: restart every loading-scoped timer from zero
    fn enter_loading(&mut self) {
        let episode = self.status.episode();
        self.armed_episode = Some(episode);
        self.scheduler.schedule(
            TimerToken::new(TimerKind::ReadinessProbe, episode),
            self.timing.readiness_delay,
        );
        self.checklist.start(episode, &mut self.scheduler);
        self.pending.activate(episode, &mut self.scheduler);
    }

    fn leave_loading(&mut self) {
        self.scheduler.cancel(TimerKind::ReadinessProbe);
        self.pending.deactivate(&mut self.scheduler);
    }

    fn publish(&mut self) {
        self.sequence += 1;
        let snapshot = self.snapshot();
        self.bus.publish(&snapshot);
    }

    /// Current value of every observable
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            sequence: self.sequence,
            status: self.status.status(),
            episode: self.status.episode(),
            checklist: self.checklist.checklist().completion_flags(),
            pending_phase: self.pending.phase(),
            screen: self.navigator.screen(),
            occupancy: self.navigator.occupancy(),
            revealed: self.reveal.revealed(),
            listening_phase: self.listening.phase(),
            language: self.language,
            direction: self.language.direction(),
            connection_lost: self.status.connection_lost(),
            facility: self.facility,
            taken_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status.status()
    }

    #[must_use]
    pub fn episode(&self) -> u64 {
        self.status.episode()
    }

    #[must_use]
    pub fn connection_lost(&self) -> bool {
        self.status.connection_lost()
    }

    #[must_use]
    pub fn checklist(&self) -> &Checklist {
        self.checklist.checklist()
    }

    #[must_use]
    pub fn pending_phase(&self) -> IndicatorPhase {
        self.pending.phase()
    }

    #[must_use]
    pub fn listening_phase(&self) -> IndicatorPhase {
        self.listening.phase()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.navigator.screen()
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.reveal.revealed()
    }

    #[must_use]
    pub fn language(&self) -> UiLanguage {
        self.language
    }

    #[must_use]
    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    #[must_use]
    pub fn facility(&self) -> FacilityMode {
        self.facility
    }

    #[must_use]
    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    #[must_use]
    pub fn bus(&self) -> &Arc<ObserverBus> {
        &self.bus
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// User actions the connection-lost overlay blocks until acknowledged
fn blocked_by_overlay(action: SessionAction) -> bool {
    matches!(
        action,
        SessionAction::Retry
            | SessionAction::ProceedToLive
            | SessionAction::GoBack
            | SessionAction::Reveal
    )
}
