// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter};

use crate::error::SessionError;
use crate::i18n::TextKey;
use crate::models::language::{TextDirection, UiLanguage};

/// One side of the two-party conversation view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Lane {
    /// Officer speaking, Arabic in, English out
    Officer,
    /// Inmate or patient hearing, English in, Arabic out
    Subject,
}

impl Lane {
    /// Language the speaker on this lane talks in
    #[must_use]
    pub fn spoken_language(self) -> UiLanguage {
        match self {
            Lane::Officer => UiLanguage::Arabic,
            Lane::Subject => UiLanguage::English,
        }
    }

    #[must_use]
    pub fn heading_key(self) -> TextKey {
        match self {
            Lane::Officer => TextKey::OfficerLane,
            Lane::Subject => TextKey::SubjectLane,
        }
    }
}

/// Text that carries its own language, independent of the console language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub text: String,
    pub language: UiLanguage,
}

impl LocalizedText {
    #[must_use]
    pub fn new(text: impl Into<String>, language: UiLanguage) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }

    #[must_use]
    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }
}

/// A single utterance and its translation. Rendered, never computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub lane: Lane,
    pub original: LocalizedText,
    pub translated: LocalizedText,
    /// Wall-clock time of the utterance, `HH:MM:SS`
    pub timestamp: String,
    pub confidence: f32,
}

impl ConversationTurn {
    /// # Errors
    ///
    /// Returns an error if `confidence` is not a finite value in `[0, 1]`.
    pub fn new(
        lane: Lane,
        original: impl Into<String>,
        translated: impl Into<String>,
        timestamp: impl Into<String>,
        confidence: f32,
    ) -> Result<Self, SessionError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(SessionError::InvalidConfidence(confidence));
        }
        let spoken = lane.spoken_language();
        Ok(Self {
            lane,
            original: LocalizedText::new(original, spoken),
            translated: LocalizedText::new(translated, spoken.toggled()),
            timestamp: timestamp.into(),
            confidence,
        })
    }

    /// Confidence as a whole percentage
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Fixed demonstration exchange shown once the conversation is revealed
///
/// # Errors
///
/// Returns an error if a turn carries an out-of-range confidence.
pub fn demo_transcript() -> Result<Vec<ConversationTurn>, SessionError> {
    [
        ConversationTurn::new(
            Lane::Officer,
            "مرحباً، أنا الضابط المسؤول عن هذه الجلسة. هل تسمعني بوضوح؟",
            "Hello, I am the officer responsible for this session. Can you hear me clearly?",
            "10:42:03",
            0.97,
        ),
        ConversationTurn::new(
            Lane::Subject,
            "Yes, I can hear you. I need to see a doctor, my chest hurts.",
            "نعم، أسمعك. أحتاج إلى رؤية طبيب، صدري يؤلمني.",
            "10:42:11",
            0.94,
        ),
        ConversationTurn::new(
            Lane::Officer,
            "سنطلب الفريق الطبي فوراً. هل تتناول أي أدوية حالياً؟",
            "We will call the medical team right away. Are you taking any medication now?",
            "10:42:19",
            0.96,
        ),
        ConversationTurn::new(
            Lane::Subject,
            "Only my asthma inhaler, twice a day.",
            "فقط بخاخ الربو، مرتين في اليوم.",
            "10:42:27",
            0.91,
        ),
    ]
    .into_iter()
    .collect()
}
