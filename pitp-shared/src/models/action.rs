// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumCount, EnumIter, VariantNames};

/// Inbound signals the session core accepts from its environment
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
pub enum SessionAction {
    SignalReady,
    SignalError,
    Retry,
    ReportConnectionLost,
    AcknowledgeConnectionLost,
    ProceedToLive,
    GoBack,
    Reveal,
    ToggleLanguage,
}

impl std::fmt::Display for SessionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for SessionAction {
    type Err = String;

    /// Parses the short console command names as well as the canonical names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s.trim().to_lowercase().as_str() {
            "ready" | "signal_ready" => SessionAction::SignalReady,
            "fail" | "error" | "signal_error" => SessionAction::SignalError,
            "retry" => SessionAction::Retry,
            "lost" | "report_connection_lost" => SessionAction::ReportConnectionLost,
            "ack" | "acknowledge_connection_lost" => SessionAction::AcknowledgeConnectionLost,
            "start" | "proceed" | "proceed_to_live" => SessionAction::ProceedToLive,
            "back" | "go_back" => SessionAction::GoBack,
            "speak" | "reveal" => SessionAction::Reveal,
            "lang" | "toggle_language" => SessionAction::ToggleLanguage,
            other => return Err(format!("Unknown action: {other}")),
        };
        Ok(action)
    }
}
