// SPDX-License-Identifier: GPL-3.0-only

//! Terminal presentation of a session snapshot.
//!
//! Rendering is a pure function of the snapshot and the transcript: every
//! console label goes through [`localize`] in the snapshot's UI language,
//! while conversation content keeps its own language and direction.

use pitp_shared::logger::{
    BG_GREEN, BG_RED, BG_YELLOW, BOLD_WHITE, CYAN, DIM, GREEN, RED, YELLOW, directed, paint,
};
use pitp_shared::{
    ChecklistStepKind, ConversationTurn, Lane, LocalizedText, Screen, SessionSnapshot,
    SessionStatus, TextDirection, TextKey, UiLanguage, localize,
};
use strum::IntoEnumIterator;

/// Visual weight of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Heading,
    Muted,
    Action,
    Done,
    StatusLoading,
    StatusReady,
    StatusError,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    pub direction: TextDirection,
    pub tone: Tone,
}

struct Frame {
    language: UiLanguage,
    lines: Vec<RenderedLine>,
}

impl Frame {
    fn label(&self, key: TextKey) -> &'static str {
        localize(self.language, key).text
    }

    fn push(&mut self, tone: Tone, text: impl Into<String>) {
        self.lines.push(RenderedLine {
            text: text.into(),
            direction: self.language.direction(),
            tone,
        });
    }

    fn push_key(&mut self, tone: Tone, key: TextKey) {
        let text = self.label(key);
        self.push(tone, text);
    }

    fn push_content(&mut self, tone: Tone, prefix: &str, content: &LocalizedText) {
        self.lines.push(RenderedLine {
            text: format!("{prefix}{}", content.text),
            direction: content.direction(),
            tone,
        });
    }
}

/// Lay out everything the console shows for `snapshot`
#[must_use]
pub fn render(snapshot: &SessionSnapshot, transcript: &[ConversationTurn]) -> Vec<RenderedLine> {
    let mut frame = Frame {
        language: snapshot.language,
        lines: Vec::new(),
    };

    header(&mut frame, snapshot);
    match snapshot.screen {
        Screen::Readiness => readiness(&mut frame, snapshot),
        Screen::Live => live(&mut frame, snapshot, transcript),
    }
    if snapshot.connection_lost {
        connection_lost(&mut frame, snapshot);
    }
    frame.lines
}

fn header(frame: &mut Frame, snapshot: &SessionSnapshot) {
    let tone = match snapshot.status {
        SessionStatus::Loading => Tone::StatusLoading,
        SessionStatus::Ready => Tone::StatusReady,
        SessionStatus::Error => Tone::StatusError,
    };

    frame.push_key(Tone::Heading, TextKey::PlatformTagline);
    let officer = format!(
        "{} · {} [{}]",
        frame.label(TextKey::OfficerName),
        frame.label(TextKey::OfficerRole),
        frame.label(snapshot.facility.badge_key()),
    );
    frame.push(Tone::Muted, officer);
    frame.push_key(tone, TextKey::header_status(snapshot.status));
    let toggle = format!(
        "[lang] {} ({})",
        frame.label(TextKey::SwitchLanguage),
        frame.label(TextKey::SwitchLanguageHint),
    );
    frame.push(Tone::Action, toggle);
}

fn readiness(frame: &mut Frame, snapshot: &SessionSnapshot) {
    let mut heading = frame.label(TextKey::heading(snapshot.status)).to_string();
    if snapshot.status.is_loading() {
        heading.push_str(snapshot.pending_phase.dots());
    }
    frame.push(Tone::Heading, heading);
    frame.push_key(Tone::Muted, TextKey::subheading(snapshot.status));

    let roles = format!(
        "{} ({})  ⇄  {} ({})",
        frame.label(TextKey::RoleOfficer),
        frame.label(TextKey::language_pill(Lane::Officer.spoken_language())),
        frame.label(snapshot.facility.subject_role_key()),
        frame.label(TextKey::language_pill(Lane::Subject.spoken_language())),
    );
    frame.push(Tone::Plain, roles);
    let channel = format!(
        "{} · {}",
        frame.label(TextKey::SecureRealtimeChannel),
        frame.label(TextKey::LanguagePair),
    );
    frame.push(Tone::Muted, channel);

    for ((index, kind), done) in ChecklistStepKind::iter()
        .enumerate()
        .zip(snapshot.checklist.iter().copied())
    {
        let (mark, tone) = if done {
            ("✔", Tone::Done)
        } else {
            ("○", Tone::Muted)
        };
        let line = format!(
            "{mark} {}. {} · {}",
            index + 1,
            frame.label(kind.title_key()),
            frame.label(kind.help_key()),
        );
        frame.push(tone, line);
    }

    if snapshot.can_proceed() {
        let action = format!("[start] {}", frame.label(TextKey::StartSession));
        frame.push(Tone::Action, action);
    }
    if snapshot.can_retry() {
        let action = format!("[retry] {}", frame.label(TextKey::RetryConnection));
        frame.push(Tone::Action, action);
    }
}

fn live(frame: &mut Frame, snapshot: &SessionSnapshot, transcript: &[ConversationTurn]) {
    if snapshot.shows_back() {
        let back = format!("[back] {}", frame.label(TextKey::Back));
        frame.push(Tone::Action, back);
    }
    frame.push_key(Tone::Heading, TextKey::LiveHeading);

    if !snapshot.revealed {
        frame.push_key(Tone::Muted, TextKey::LivePrompt);
        let speak = format!("[speak] {}", frame.label(TextKey::Speak));
        frame.push(Tone::Action, speak);
        return;
    }

    let listening = format!(
        "{}{}",
        frame.label(TextKey::Listening),
        snapshot.listening_phase.dots()
    );
    frame.push(Tone::Done, listening);

    for lane in Lane::iter() {
        frame.push_key(Tone::Heading, lane.heading_key());
        for turn in transcript.iter().filter(|turn| turn.lane == lane) {
            let meta = format!(
                "{} · {} {}%",
                turn.timestamp,
                frame.label(TextKey::ConfidenceLabel),
                turn.confidence_percent()
            );
            frame.push(Tone::Muted, meta);
            let original = format!("{}: ", frame.label(TextKey::OriginalLabel));
            frame.push_content(Tone::Plain, &original, &turn.original);
            let translated = format!("{}: ", frame.label(TextKey::TranslationLabel));
            frame.push_content(Tone::Plain, &translated, &turn.translated);
        }
    }

    if !snapshot.controls_visible() {
        return;
    }
    let controls = [
        TextKey::ExportTranscript,
        TextKey::ClearConversation,
        TextKey::FlagIncident,
        TextKey::SessionNotes,
    ]
    .into_iter()
    .map(|key| format!("[{}]", frame.label(key)))
    .collect::<Vec<_>>()
    .join(" ");
    frame.push(Tone::Muted, controls);
}

fn connection_lost(frame: &mut Frame, snapshot: &SessionSnapshot) {
    frame.push_key(Tone::Alert, TextKey::ConnectionLostTitle);
    frame.push_key(Tone::Alert, TextKey::ConnectionLostBody);
    if snapshot.voice_paused() {
        frame.push_key(Tone::Muted, TextKey::VoicePaused);
    }
    let ack = format!("[ack] {}", frame.label(TextKey::ConnectionLostAcknowledge));
    frame.push(Tone::Action, ack);
}

/// Colour and direction-mark each line for an ANSI terminal
#[must_use]
pub fn to_terminal(lines: &[RenderedLine]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let painted = match line.tone {
                Tone::Plain => line.text.clone(),
                Tone::Heading => paint(BOLD_WHITE, &line.text),
                Tone::Muted => paint(DIM, &line.text),
                Tone::Action => paint(CYAN, &line.text),
                Tone::Done => paint(GREEN, &line.text),
                Tone::StatusLoading => paint(BG_YELLOW, &line.text),
                Tone::StatusReady => paint(BG_GREEN, &line.text),
                Tone::StatusError => paint(BG_RED, &line.text),
                Tone::Alert => paint(RED, &line.text),
            };
            directed(line.direction, &painted)
        })
        .collect()
}

/// Whether `next` differs from `prev` in more than indicator phases
#[must_use]
pub fn is_structural_change(prev: Option<&SessionSnapshot>, next: &SessionSnapshot) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    prev.status != next.status
        || prev.episode != next.episode
        || prev.checklist != next.checklist
        || prev.screen != next.screen
        || prev.occupancy != next.occupancy
        || prev.revealed != next.revealed
        || prev.language != next.language
        || prev.connection_lost != next.connection_lost
        || prev.facility != next.facility
}

/// One-line summary for log output and the `status` command
#[must_use]
pub fn summary(snapshot: &SessionSnapshot) -> String {
    let status = localize(snapshot.language, TextKey::header_status(snapshot.status));
    let mut line = format!(
        "#{} {} | {}/{} | {}",
        snapshot.sequence,
        status,
        snapshot.checklist_completed(),
        snapshot.checklist.len(),
        snapshot.screen,
    );
    if snapshot.connection_lost {
        line.push_str(&paint(YELLOW, " | !"));
    }
    line
}
