// SPDX-License-Identifier: GPL-3.0-only
use pitp_shared::{
    CHECKLIST_STEP_COUNT, IndicatorPhase, ObserverBus, Screen, SessionAction, SessionError,
    SessionSnapshot, SessionStatus, TextDirection, UiLanguage,
};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::runtime::VirtualScheduler;

fn new_core() -> SessionCore<VirtualScheduler> {
    SessionCore::new(
        VirtualScheduler::new(),
        SessionTiming::default(),
        Arc::new(ObserverBus::default()),
    )
}

fn started_core() -> SessionCore<VirtualScheduler> {
    let mut core = new_core();
    core.start();
    core
}

fn ready_core() -> SessionCore<VirtualScheduler> {
    let mut core = started_core();
    core.handle(SessionAction::SignalReady).unwrap();
    core
}

fn live_core() -> SessionCore<VirtualScheduler> {
    let mut core = ready_core();
    core.handle(SessionAction::ProceedToLive).unwrap();
    core
}

/// Drop the fields that change on every publish so snapshots can be compared
fn structural(snapshot: &SessionSnapshot) -> SessionSnapshot {
    let mut snapshot = snapshot.clone();
    snapshot.sequence = 0;
    snapshot.taken_at = chrono::DateTime::<chrono::Utc>::MIN_UTC;
    snapshot
}

fn assert_loading_timers(core: &SessionCore<VirtualScheduler>, armed: bool) {
    for kind in [
        TimerKind::ReadinessProbe,
        TimerKind::ChecklistTick,
        TimerKind::PendingIndicator,
    ] {
        assert_eq!(
            core.scheduler().is_scheduled(kind),
            armed,
            "{} armed state",
            kind.as_ref()
        );
    }
}

#[test]
fn test_start_enters_loading_episode_one() {
    let core = started_core();

    assert_eq!(core.status(), SessionStatus::Loading);
    assert_eq!(core.episode(), 1);
    assert_eq!(core.checklist().completed_count(), 0);
    assert_eq!(core.screen(), Screen::Readiness);
    assert!(!core.revealed());
    assert!(!core.connection_lost());
    assert_loading_timers(&core, true);
    assert!(!core.scheduler().is_scheduled(TimerKind::ListeningIndicator));
}

#[test]
fn test_start_is_idempotent() {
    let mut core = started_core();
    core.advance_ms(400);
    core.start();

    assert_eq!(core.checklist().completed_count(), 1);
    assert_eq!(core.bus().recent(10).len(), 2);
}

#[test]
fn test_start_after_ready_keeps_forced_checklist() {
    let mut core = new_core();
    core.handle(SessionAction::SignalReady).unwrap();

    core.start();

    assert_eq!(core.status(), SessionStatus::Ready);
    assert_eq!(core.checklist().completed_count(), CHECKLIST_STEP_COUNT);
    assert_eq!(core.pending_phase(), IndicatorPhase::ZERO);
    assert_loading_timers(&core, false);
    assert_eq!(core.bus().latest().unwrap().status, SessionStatus::Ready);
}

#[test]
fn test_start_after_error_stays_quiet() {
    let mut core = new_core();
    core.handle(SessionAction::SignalError).unwrap();

    core.start();

    assert_eq!(core.status(), SessionStatus::Error);
    assert_eq!(core.scheduler().pending_count(), 0);
}

#[test]
fn test_start_does_not_restart_a_retried_episode() {
    let mut core = new_core();
    core.handle(SessionAction::SignalError).unwrap();
    core.handle(SessionAction::Retry).unwrap();
    core.advance_ms(800);
    assert_eq!(core.checklist().completed_count(), 2);

    core.start();

    assert_eq!(core.episode(), 2);
    assert_eq!(core.checklist().completed_count(), 2);
    core.advance_ms(400);
    assert_eq!(core.checklist().completed_count(), 3);
}

#[test]
fn test_signal_ready_applies_once() {
    let mut core = started_core();

    assert_eq!(core.handle(SessionAction::SignalReady), Ok(Transition::Applied));
    assert_eq!(core.handle(SessionAction::SignalReady), Ok(Transition::Unchanged));
    assert_eq!(core.status(), SessionStatus::Ready);
}

#[test]
fn test_signal_error_applies_once() {
    let mut core = started_core();

    assert_eq!(core.handle(SessionAction::SignalError), Ok(Transition::Applied));
    assert_eq!(core.handle(SessionAction::SignalError), Ok(Transition::Unchanged));
    assert_eq!(core.status(), SessionStatus::Error);
}

#[test]
fn test_ready_forces_checklist_complete_and_stops_timers() {
    let mut core = started_core();
    core.advance_ms(400);
    assert_eq!(core.checklist().completed_count(), 1);

    core.handle(SessionAction::SignalReady).unwrap();

    assert_eq!(core.checklist().completed_count(), CHECKLIST_STEP_COUNT);
    assert_eq!(core.pending_phase(), IndicatorPhase::ZERO);
    assert_loading_timers(&core, false);
}

#[test]
fn test_error_resets_checklist_and_stops_timers() {
    let mut core = started_core();
    core.advance_ms(1200);
    assert_eq!(core.checklist().completed_count(), 3);

    core.handle(SessionAction::SignalError).unwrap();

    assert_eq!(core.checklist().completed_count(), 0);
    assert_eq!(core.pending_phase(), IndicatorPhase::ZERO);
    assert_loading_timers(&core, false);
    assert_eq!(core.scheduler().pending_count(), 0);
}

#[test]
fn test_ready_is_not_reachable_from_error() {
    let mut core = started_core();
    core.handle(SessionAction::SignalError).unwrap();
    let before = core.snapshot();

    let result = core.handle(SessionAction::SignalReady);

    assert_eq!(
        result,
        Err(SessionError::InvalidTransition {
            from: SessionStatus::Error,
            action: SessionAction::SignalReady,
        })
    );
    assert_eq!(structural(&core.snapshot()), structural(&before));
}

#[test]
fn test_error_is_not_reachable_from_ready() {
    let mut core = ready_core();

    let result = core.handle(SessionAction::SignalError);

    assert!(matches!(result, Err(SessionError::InvalidTransition { .. })));
    assert_eq!(core.status(), SessionStatus::Ready);
}

#[test]
fn test_retry_only_from_error() {
    let mut core = started_core();
    assert!(matches!(
        core.handle(SessionAction::Retry),
        Err(SessionError::InvalidTransition {
            from: SessionStatus::Loading,
            ..
        })
    ));

    core.handle(SessionAction::SignalReady).unwrap();
    assert!(matches!(
        core.handle(SessionAction::Retry),
        Err(SessionError::InvalidTransition {
            from: SessionStatus::Ready,
            ..
        })
    ));
}

#[test]
fn test_retry_starts_fresh_episode() {
    let mut core = started_core();
    core.handle(SessionAction::SignalError).unwrap();

    assert_eq!(core.handle(SessionAction::Retry), Ok(Transition::Applied));

    assert_eq!(core.status(), SessionStatus::Loading);
    assert_eq!(core.episode(), 2);
    assert_eq!(core.checklist().completed_count(), 0);
    assert_eq!(core.pending_phase(), IndicatorPhase::ZERO);
    assert_loading_timers(&core, true);
}

#[test]
fn test_stale_probe_from_previous_episode_is_discarded() {
    let mut core = started_core();
    core.handle(SessionAction::SignalError).unwrap();
    core.handle(SessionAction::Retry).unwrap();

    let stale = TimerToken::new(TimerKind::ReadinessProbe, 1);
    assert_eq!(
        core.handle(SessionInput::Timer(stale)),
        Ok(Transition::Unchanged)
    );
    assert_eq!(core.status(), SessionStatus::Loading);
}

#[test]
fn test_stale_checklist_tick_is_discarded() {
    let mut core = started_core();
    core.handle(SessionAction::SignalError).unwrap();
    core.handle(SessionAction::Retry).unwrap();

    let stale = TimerToken::new(TimerKind::ChecklistTick, 1);
    assert_eq!(
        core.handle(SessionInput::Timer(stale)),
        Ok(Transition::Unchanged)
    );
    assert_eq!(core.checklist().completed_count(), 0);

    let current = TimerToken::new(TimerKind::ChecklistTick, 2);
    assert_eq!(
        core.handle(SessionInput::Timer(current)),
        Ok(Transition::Applied)
    );
    assert_eq!(core.checklist().completed_count(), 1);
}

#[test]
fn test_ticks_after_ready_are_discarded() {
    let mut core = ready_core();
    let before = core.snapshot();

    for kind in [
        TimerKind::ReadinessProbe,
        TimerKind::ChecklistTick,
        TimerKind::PendingIndicator,
    ] {
        let token = TimerToken::new(kind, core.episode());
        assert_eq!(
            core.handle(SessionInput::Timer(token)),
            Ok(Transition::Unchanged)
        );
    }
    assert_eq!(structural(&core.snapshot()), structural(&before));
}

#[test]
fn test_stale_listening_tick_from_previous_occupancy_is_discarded() {
    let mut core = live_core();
    core.handle(SessionAction::Reveal).unwrap();
    core.handle(SessionAction::GoBack).unwrap();
    core.handle(SessionAction::ProceedToLive).unwrap();
    core.handle(SessionAction::Reveal).unwrap();

    let stale = TimerToken::new(TimerKind::ListeningIndicator, 1);
    assert_eq!(
        core.handle(SessionInput::Timer(stale)),
        Ok(Transition::Unchanged)
    );
    assert_eq!(core.listening_phase(), IndicatorPhase::ZERO);
}

#[test]
fn test_proceed_requires_ready() {
    let mut core = started_core();

    let result = core.handle(SessionAction::ProceedToLive);

    assert!(matches!(
        result,
        Err(SessionError::PreconditionViolated {
            action: SessionAction::ProceedToLive,
            ..
        })
    ));
    assert_eq!(core.screen(), Screen::Readiness);
}

#[test]
fn test_proceed_twice_is_rejected() {
    let mut core = live_core();

    assert!(matches!(
        core.handle(SessionAction::ProceedToLive),
        Err(SessionError::PreconditionViolated { .. })
    ));
    assert_eq!(core.snapshot().occupancy, 1);
}

#[test]
fn test_reveal_requires_live_screen() {
    let mut core = ready_core();

    assert!(matches!(
        core.handle(SessionAction::Reveal),
        Err(SessionError::PreconditionViolated {
            action: SessionAction::Reveal,
            ..
        })
    ));
    assert!(!core.revealed());
}

#[test]
fn test_reveal_is_one_shot() {
    let mut core = live_core();

    assert_eq!(core.handle(SessionAction::Reveal), Ok(Transition::Applied));
    assert_eq!(core.handle(SessionAction::Reveal), Ok(Transition::Unchanged));
    assert!(core.revealed());
    assert!(core.scheduler().is_scheduled(TimerKind::ListeningIndicator));
}

#[test]
fn test_back_on_readiness_is_a_no_op() {
    let mut core = ready_core();
    assert_eq!(core.handle(SessionAction::GoBack), Ok(Transition::Unchanged));
}

#[test]
fn test_back_discards_live_state_and_listening_timer() {
    let mut core = live_core();
    core.handle(SessionAction::Reveal).unwrap();
    core.advance_ms(500);
    assert_eq!(core.listening_phase().value(), 1);

    core.handle(SessionAction::GoBack).unwrap();

    assert_eq!(core.screen(), Screen::Readiness);
    assert!(!core.revealed());
    assert_eq!(core.listening_phase(), IndicatorPhase::ZERO);
    assert!(!core.scheduler().is_scheduled(TimerKind::ListeningIndicator));
    assert_eq!(core.scheduler().pending_count(), 0);
}

#[test]
fn test_connection_lost_is_idempotent() {
    let mut core = started_core();

    assert_eq!(
        core.handle(SessionAction::AcknowledgeConnectionLost),
        Ok(Transition::Unchanged)
    );
    assert_eq!(
        core.handle(SessionAction::ReportConnectionLost),
        Ok(Transition::Applied)
    );
    assert_eq!(
        core.handle(SessionAction::ReportConnectionLost),
        Ok(Transition::Unchanged)
    );
    assert!(core.connection_lost());
    assert_eq!(core.status(), SessionStatus::Loading);
}

#[test]
fn test_overlay_blocks_user_actions_until_acknowledged() {
    let mut core = ready_core();
    core.handle(SessionAction::ReportConnectionLost).unwrap();

    for action in [
        SessionAction::ProceedToLive,
        SessionAction::GoBack,
        SessionAction::Reveal,
        SessionAction::Retry,
    ] {
        assert!(
            matches!(
                core.handle(action),
                Err(SessionError::PreconditionViolated { .. })
            ),
            "{action} should be blocked"
        );
    }
    assert_eq!(core.screen(), Screen::Readiness);

    core.handle(SessionAction::AcknowledgeConnectionLost).unwrap();
    assert_eq!(
        core.handle(SessionAction::ProceedToLive),
        Ok(Transition::Applied)
    );
}

#[test]
fn test_overlay_allows_language_toggle_and_signals() {
    let mut core = started_core();
    core.handle(SessionAction::ReportConnectionLost).unwrap();

    assert_eq!(
        core.handle(SessionAction::ToggleLanguage),
        Ok(Transition::Applied)
    );
    assert_eq!(core.handle(SessionAction::SignalReady), Ok(Transition::Applied));
    assert!(core.connection_lost());
    assert_eq!(core.status(), SessionStatus::Ready);
}

#[test]
fn test_language_toggle_changes_only_language() {
    let mut core = live_core();
    core.handle(SessionAction::Reveal).unwrap();
    core.advance_ms(500);
    let before = core.snapshot();

    core.handle(SessionAction::ToggleLanguage).unwrap();
    let after = core.snapshot();

    assert_eq!(after.language, UiLanguage::Arabic);
    assert_eq!(after.direction, TextDirection::Rtl);

    let mut expected = structural(&before);
    expected.language = after.language;
    expected.direction = after.direction;
    assert_eq!(structural(&after), expected);
}

#[test]
fn test_language_toggle_leaves_timers_untouched() {
    let mut core = started_core();
    core.advance_ms(800);

    core.handle(SessionAction::ToggleLanguage).unwrap();
    core.handle(SessionAction::ToggleLanguage).unwrap();
    core.advance_ms(400);

    assert_eq!(core.language(), UiLanguage::English);
    assert_eq!(core.checklist().completed_count(), 3);
    assert_eq!(core.scheduler().now(), Duration::from_millis(1200));
}

#[test]
fn test_builders_set_presentation() {
    let core = new_core()
        .with_language(UiLanguage::Arabic)
        .with_facility(pitp_shared::FacilityMode::Hospital);

    let snapshot = core.snapshot();
    assert_eq!(snapshot.language, UiLanguage::Arabic);
    assert_eq!(snapshot.direction, TextDirection::Rtl);
    assert_eq!(snapshot.facility, pitp_shared::FacilityMode::Hospital);
}

#[test]
fn test_probe_outcome_decides_first_episode() {
    let mut core = new_core().with_probe(ProbeOutcome::Error);
    core.start();

    core.advance_ms(2500);

    assert_eq!(core.status(), SessionStatus::Error);
    assert_eq!(core.checklist().completed_count(), 0);
}

#[test]
fn test_applied_transitions_are_published() {
    let mut core = new_core();
    let (_, mut rx) = core.bus().subscribe("test").unwrap();

    core.start();
    let first = rx.try_recv().unwrap();
    assert_eq!(first.sequence, 1);
    assert_eq!(first.status, SessionStatus::Loading);

    core.handle(SessionAction::SignalReady).unwrap();
    let second = rx.try_recv().unwrap();
    assert_eq!(second.sequence, 2);
    assert_eq!(second.status, SessionStatus::Ready);
    assert_eq!(second.checklist_completed(), CHECKLIST_STEP_COUNT);
}

#[test]
fn test_unchanged_and_rejected_inputs_are_not_published() {
    let mut core = ready_core();
    let (_, mut rx) = core.bus().subscribe("test").unwrap();

    core.handle(SessionAction::SignalReady).unwrap();
    let _ = core.handle(SessionAction::Retry);
    let _ = core.handle(SessionAction::Reveal);

    assert!(rx.try_recv().is_err());
    assert_eq!(core.bus().latest().map(|s| s.sequence), Some(2));
}

#[test]
fn test_timing_validation() {
    assert!(SessionTiming::default().validate().is_ok());

    let timing = SessionTiming {
        indicator_tick: Duration::ZERO,
        ..SessionTiming::default()
    };
    assert_eq!(
        timing.validate(),
        Err(SessionError::InvalidTiming {
            field: "indicator_tick"
        })
    );
}
