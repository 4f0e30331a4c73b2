// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumCount, EnumIter, VariantNames};

use crate::i18n::TextKey;

/// Number of readiness steps shown while the channel is prepared
pub const CHECKLIST_STEP_COUNT: usize = <ChecklistStepKind as strum::EnumCount>::COUNT;

/// The fixed readiness steps, in completion order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumCount,
    EnumIter,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChecklistStepKind {
    SecureChannel,
    DeviceIdentity,
    Microphone,
    LanguageEngine,
    AuditLog,
}

impl ChecklistStepKind {
    #[must_use]
    pub fn title_key(self) -> TextKey {
        match self {
            ChecklistStepKind::SecureChannel => TextKey::StepSecureChannelTitle,
            ChecklistStepKind::DeviceIdentity => TextKey::StepDeviceIdentityTitle,
            ChecklistStepKind::Microphone => TextKey::StepMicrophoneTitle,
            ChecklistStepKind::LanguageEngine => TextKey::StepLanguageEngineTitle,
            ChecklistStepKind::AuditLog => TextKey::StepAuditLogTitle,
        }
    }

    #[must_use]
    pub fn help_key(self) -> TextKey {
        match self {
            ChecklistStepKind::SecureChannel => TextKey::StepSecureChannelHelp,
            ChecklistStepKind::DeviceIdentity => TextKey::StepDeviceIdentityHelp,
            ChecklistStepKind::Microphone => TextKey::StepMicrophoneHelp,
            ChecklistStepKind::LanguageEngine => TextKey::StepLanguageEngineHelp,
            ChecklistStepKind::AuditLog => TextKey::StepAuditLogHelp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistStep {
    /// 1-based position in the checklist
    pub index: usize,
    pub kind: ChecklistStepKind,
    pub completed: bool,
}

/// Ordered readiness steps that only ever fill as a prefix: step `i` is
/// complete only if every step before it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    steps: Vec<ChecklistStep>,
}

impl Default for Checklist {
    fn default() -> Self {
        Self::new()
    }
}

impl Checklist {
    #[must_use]
    pub fn new() -> Self {
        let steps = ChecklistStepKind::iter()
            .enumerate()
            .map(|(i, kind)| ChecklistStep {
                index: i + 1,
                kind,
                completed: false,
            })
            .collect();
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[ChecklistStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.steps.iter().take_while(|step| step.completed).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_count() == self.steps.len()
    }

    #[must_use]
    pub fn completion_flags(&self) -> Vec<bool> {
        self.steps.iter().map(|step| step.completed).collect()
    }

    /// Mark the first incomplete step. Returns its index, or `None` when
    /// every step was already complete.
    pub fn complete_next(&mut self) -> Option<usize> {
        let step = self.steps.iter_mut().find(|step| !step.completed)?;
        step.completed = true;
        Some(step.index)
    }

    pub fn complete_all(&mut self) {
        for step in &mut self.steps {
            step.completed = true;
        }
    }

    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.completed = false;
        }
    }
}
