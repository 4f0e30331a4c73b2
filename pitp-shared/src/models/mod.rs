// SPDX-License-Identifier: GPL-3.0-only
pub mod action;
pub mod checklist;
pub mod facility;
pub mod indicator;
pub mod language;
pub mod screen;
pub mod snapshot;
pub mod status;
pub mod turn;


pub use action::SessionAction;
pub use checklist::{CHECKLIST_STEP_COUNT, Checklist, ChecklistStep, ChecklistStepKind};
pub use facility::FacilityMode;
pub use indicator::IndicatorPhase;
pub use language::{TextDirection, UiLanguage};
pub use screen::Screen;
pub use snapshot::SessionSnapshot;
pub use status::SessionStatus;
pub use turn::{ConversationTurn, Lane, LocalizedText, demo_transcript};
