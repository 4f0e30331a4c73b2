// SPDX-License-Identifier: GPL-3.0-only

//! Console entry point
//!
//! Resolves settings from the config file and the command line, then runs
//! either the interactive console or the scripted walk-through.

use crate::cli;
use crate::config::ConsoleConfig;
use crate::render::{is_structural_change, render, summary, to_terminal};
use crate::runtime::{SessionHandle, SessionRuntime, script};
use crate::session::{ProbeOutcome, SessionTiming};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use pitp_shared::logger::{BOLD_YELLOW, CYAN, DIM, YELLOW, print_color, print_lines};
use pitp_shared::{
    ConversationTurn, FacilityMode, ObserverBus, SessionAction, SessionSnapshot, UiLanguage,
    demo_transcript,
};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

const COMMAND_HELP: &str =
    "Commands: start, back, speak, retry, lang, lost, ack, fail, ready, status, quit";

/// Effective settings after applying CLI overrides to the config file
#[derive(Debug, Clone, Copy, PartialEq)]
struct Settings {
    timing: SessionTiming,
    language: UiLanguage,
    facility: FacilityMode,
    probe: ProbeOutcome,
}

impl Settings {
    fn resolve(matches: &clap::ArgMatches, config: &ConsoleConfig) -> Result<Self> {
        let mut timing = config.timing.clone();
        // Only use CLI arguments if they were explicitly provided
        if let Some(ms) = matches.get_one::<u64>("readiness-delay") {
            timing.readiness_delay_ms = *ms;
        }
        if let Some(ms) = matches.get_one::<u64>("checklist-tick") {
            timing.checklist_tick_ms = *ms;
        }
        if let Some(ms) = matches.get_one::<u64>("indicator-tick") {
            timing.indicator_tick_ms = *ms;
        }

        let probe = if matches.get_flag("fail-probe") {
            ProbeOutcome::Error
        } else {
            ProbeOutcome::Ready
        };

        Ok(Self {
            timing: timing.to_timing().context("Invalid session timing")?,
            language: matches
                .get_one::<UiLanguage>("lang")
                .copied()
                .unwrap_or(config.ui.language),
            facility: matches
                .get_one::<FacilityMode>("mode")
                .copied()
                .unwrap_or(config.ui.facility),
            probe,
        })
    }
}

/// A line typed into the interactive console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleCommand {
    Action(SessionAction),
    Status,
    Help,
    Quit,
    Empty,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(ConsoleCommand::Empty),
            "status" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            other => other.parse::<SessionAction>().map(ConsoleCommand::Action),
        }
    }
}

/// Main entry point for the console
///
/// # Errors
///
/// Returns an error if the settings are invalid or the session fails.
pub async fn run() -> Result<()> {
    let matches = cli::build().get_matches();
    // Global flags may follow the subcommand
    let args = matches.subcommand().map_or(&matches, |(_, sub)| sub);
    let verbose = args.get_flag("verbose");

    // Initialize logging - respect RUST_LOG env var, fallback to verbose flag
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        let log_level = if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .init();
    }

    let config_path = ConsoleConfig::get_config_path();
    let (mut config, origin) = ConsoleConfig::load_from(&config_path);
    let settings = Settings::resolve(args, &config)?;

    info!("Starting PITP session console");
    info!("Language: {}", settings.language);
    info!("Facility: {}", settings.facility);
    debug!("Timing: {:?}", settings.timing);

    if let Some(script_matches) = matches.subcommand_matches("script") {
        return handle_script_command(&settings, script_matches.get_flag("json")).await;
    }

    let language = handle_run_command(&settings).await?;
    config.update_language(&config_path, origin, settings.language, language);

    info!("Console stopped gracefully");
    Ok(())
}

/// Interactive console on real timers. Returns the UI language at exit.
async fn handle_run_command(settings: &Settings) -> Result<UiLanguage> {
    let bus = Arc::new(ObserverBus::default());
    let transcript = demo_transcript().context("Invalid demonstration transcript")?;
    let (terminal, updates) = bus
        .subscribe("terminal")
        .context("Failed to subscribe terminal renderer")?;

    let runtime = SessionRuntime::new(
        settings.timing,
        settings.language,
        settings.facility,
        settings.probe,
        Arc::clone(&bus),
    );
    let handle = runtime.handle();
    let session = tokio::spawn(runtime.run());
    let renderer = tokio::spawn(render_updates(updates, transcript));

    print_color(DIM, COMMAND_HELP).await;
    read_commands(&handle, &bus).await?;

    handle.shutdown()?;
    let last = session.await.context("Session task panicked")?;
    bus.unsubscribe(&terminal);
    if let Err(e) = renderer.await {
        warn!("Renderer task ended abnormally: {e}");
    }

    Ok(last.language)
}

async fn render_updates(
    mut updates: broadcast::Receiver<SessionSnapshot>,
    transcript: Vec<ConversationTurn>,
) {
    let mut last: Option<SessionSnapshot> = None;

    loop {
        match updates.recv().await {
            Ok(snapshot) => {
                if is_structural_change(last.as_ref(), &snapshot) {
                    print_lines(&to_terminal(&render(&snapshot, &transcript))).await;
                } else {
                    debug!("{}", summary(&snapshot));
                }
                last = Some(snapshot);
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Renderer skipped {skipped} snapshots");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn read_commands(handle: &SessionHandle, bus: &ObserverBus) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, initiating shutdown...");
                return Ok(());
            }
        };

        // End of input
        let Some(line) = line else {
            return Ok(());
        };

        match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Action(action)) => handle.send(action)?,
            Ok(ConsoleCommand::Status) => {
                if let Some(snapshot) = bus.latest() {
                    print_color(CYAN, &serde_json::to_string_pretty(&snapshot)?).await;
                }
                print_color(DIM, &format!("observers: {}", bus.stats())).await;
            }
            Ok(ConsoleCommand::Help) => print_color(DIM, COMMAND_HELP).await,
            Ok(ConsoleCommand::Quit) => return Ok(()),
            Ok(ConsoleCommand::Empty) => {}
            Err(e) => print_color(YELLOW, &format!("{e}. {COMMAND_HELP}")).await,
        }
    }
}

/// Scripted walk-through on the virtual clock
async fn handle_script_command(settings: &Settings, json: bool) -> Result<()> {
    let steps = script::walkthrough(
        settings.timing,
        settings.language,
        settings.facility,
        settings.probe,
    )?;
    let transcript = demo_transcript().context("Invalid demonstration transcript")?;

    for step in &steps {
        let at_ms = u64::try_from(step.at.as_millis()).unwrap_or(u64::MAX);
        if json {
            let line = serde_json::json!({
                "label": step.label,
                "at_ms": at_ms,
                "snapshot": step.snapshot,
            });
            print_lines(&[serde_json::to_string(&line)?]).await;
        } else {
            print_color(BOLD_YELLOW, &format!("== {} @ {at_ms} ms ==", step.label)).await;
            print_lines(&to_terminal(&render(&step.snapshot, &transcript))).await;
        }
    }

    info!("Walk-through finished after {} steps", steps.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use std::time::Duration;

    #[test]
    fn test_console_commands() {
        assert_eq!("quit".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Quit));
        assert_eq!("  ".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Empty));
        assert_eq!("STATUS".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Status));
        assert_eq!(
            "speak".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Action(SessionAction::Reveal))
        );
        assert_eq!(
            "start".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Action(SessionAction::ProceedToLive))
        );
        assert!("dance".parse::<ConsoleCommand>().is_err());
    }

    #[test]
    fn test_settings_come_from_config_without_flags() {
        let mut config = ConsoleConfig::default();
        config.ui.language = UiLanguage::Arabic;
        config.timing = TimingConfig {
            readiness_delay_ms: 1000,
            ..TimingConfig::default()
        };
        let matches = cli::build().try_get_matches_from(["pitp"]).unwrap();

        let settings = Settings::resolve(&matches, &config).unwrap();
        assert_eq!(settings.language, UiLanguage::Arabic);
        assert_eq!(settings.facility, FacilityMode::Prison);
        assert_eq!(settings.timing.readiness_delay, Duration::from_millis(1000));
        assert_eq!(settings.probe, ProbeOutcome::Ready);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = ConsoleConfig::default();
        config.ui.language = UiLanguage::Arabic;
        let matches = cli::build()
            .try_get_matches_from([
                "pitp",
                "--lang",
                "en",
                "--mode",
                "hospital",
                "--checklist-tick",
                "700",
                "--fail-probe",
            ])
            .unwrap();

        let settings = Settings::resolve(&matches, &config).unwrap();
        assert_eq!(settings.language, UiLanguage::English);
        assert_eq!(settings.facility, FacilityMode::Hospital);
        assert_eq!(settings.timing.checklist_tick, Duration::from_millis(700));
        assert_eq!(settings.probe, ProbeOutcome::Error);
    }

    #[test]
    fn test_invalid_config_timing_is_rejected() {
        let mut config = ConsoleConfig::default();
        config.timing.indicator_tick_ms = 0;
        let matches = cli::build().try_get_matches_from(["pitp"]).unwrap();

        assert!(Settings::resolve(&matches, &config).is_err());
    }
}
