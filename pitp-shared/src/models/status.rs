// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumCount, EnumIter, VariantNames};

/// Readiness of the secure translation channel.
///
/// `Ready` is only ever entered from `Loading`; `Error` recovers through
/// `Loading` again via an explicit retry.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Loading,
    Ready,
    Error,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl SessionStatus {
    #[must_use]
    pub fn is_loading(self) -> bool {
        self == SessionStatus::Loading
    }

    #[must_use]
    pub fn is_ready(self) -> bool {
        self == SessionStatus::Ready
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        self == SessionStatus::Error
    }
}
