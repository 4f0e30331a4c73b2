// SPDX-License-Identifier: GPL-3.0-only
use log::{debug, error, warn};
use pitp_shared::{FacilityMode, SessionError, UiLanguage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::SessionTiming;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub timing: TimingConfig,
    pub ui: UiConfig,
}

/// Timer cadence, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub readiness_delay_ms: u64,
    pub checklist_tick_ms: u64,
    pub indicator_tick_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub language: UiLanguage,
    pub facility: FacilityMode,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            readiness_delay_ms: 2500,
            checklist_tick_ms: 400,
            indicator_tick_ms: 500,
        }
    }
}

impl TimingConfig {
    /// # Errors
    ///
    /// Returns an error if any interval is zero.
    pub fn to_timing(&self) -> Result<SessionTiming, SessionError> {
        let timing = SessionTiming {
            readiness_delay: Duration::from_millis(self.readiness_delay_ms),
            checklist_tick: Duration::from_millis(self.checklist_tick_ms),
            indicator_tick: Duration::from_millis(self.indicator_tick_ms),
        };
        timing.validate()?;
        Ok(timing)
    }
}

/// How [`ConsoleConfig::load_from`] obtained its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Missing,
    /// The file exists but could not be parsed; it must not be overwritten
    Invalid,
}

impl ConsoleConfig {
    /// Get the config file path
    #[must_use]
    pub fn get_config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".config")
            })
            .join("pitp");

        config_dir.join("console.toml")
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// is missing, unreadable or invalid
    #[must_use]
    pub fn load_from(path: &Path) -> (Self, ConfigOrigin) {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ConsoleConfig>(&content) {
                Ok(config) => {
                    debug!("Loaded console config from {}", path.display());
                    (config, ConfigOrigin::File)
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {e}. Using defaults.",
                        path.display()
                    );
                    (Self::default(), ConfigOrigin::Invalid)
                }
            },
            Err(e) => {
                debug!(
                    "Config file {} not found or unreadable: {e}. Using defaults.",
                    path.display()
                );
                (Self::default(), ConfigOrigin::Missing)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_content = toml::to_string_pretty(self)?;
        fs::write(path, toml_content)?;

        debug!("Saved console config to {}", path.display());
        Ok(())
    }

    /// Remember a language toggled during the session and save to `path`.
    ///
    /// Nothing is written when the session ended in the language it started
    /// with, or when `origin` is [`ConfigOrigin::Invalid`]. Returns whether
    /// the file was written.
    pub fn update_language(
        &mut self,
        path: &Path,
        origin: ConfigOrigin,
        started: UiLanguage,
        finished: UiLanguage,
    ) -> bool {
        if started == finished || self.ui.language == finished {
            return false;
        }
        if origin == ConfigOrigin::Invalid {
            warn!(
                "Not saving language {finished}: {} could not be parsed",
                path.display()
            );
            return false;
        }

        self.ui.language = finished;
        match self.save_to(path) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save config after language update: {e}");
                false
            }
        }
    }
}
