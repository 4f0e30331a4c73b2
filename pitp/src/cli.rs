// SPDX-License-Identifier: GPL-3.0-only
use clap::{ArgAction, Command, arg, command, value_parser};
use pitp_shared::{FacilityMode, UiLanguage};

#[must_use]
pub fn build() -> Command {
    command!()
    .about("🛡️ PITP Session Console - bilingual translation session readiness")
    .long_about(
        "Demonstration console for the Prisoner Intelligent Translation Platform. Prepares a secure translation session, gates the live conversation view behind it and renders every state in English or Arabic."
    )
    .subcommand_required(false)
    .arg_required_else_help(false)
    .subcommand(
        Command::new("run")
            .about("🎙️ Interactive console (default)")
            .long_about("Run the session on real timers and drive it with commands on stdin: start, back, speak, retry, lang, lost, ack, fail, ready, status, quit.")
    )
    .subcommand(
        Command::new("script")
            .about("📜 Deterministic walk-through on a virtual clock")
            .long_about("Drive a whole session from loading to a second live visit without waiting on real time and print every captured state.")
            .arg(
                arg!(--json "Print snapshots as JSON lines")
                .action(ArgAction::SetTrue)
            )
    )
    .arg(
        arg!(--lang <lang> "Console language")
        .required(false)
        .global(true)
        .value_parser(value_parser!(UiLanguage))
    )
    .arg(
        arg!(--mode <mode> "Facility the console is deployed in")
        .required(false)
        .global(true)
        .value_parser(value_parser!(FacilityMode))
    )
    .arg(
        arg!(--"readiness-delay" <ms> "Delay before the readiness probe reports, in milliseconds")
        .required(false)
        .global(true)
        .value_parser(value_parser!(u64).range(1..))
    )
    .arg(
        arg!(--"checklist-tick" <ms> "Interval between checklist steps, in milliseconds")
        .required(false)
        .global(true)
        .value_parser(value_parser!(u64).range(1..))
    )
    .arg(
        arg!(--"indicator-tick" <ms> "Interval between indicator phases, in milliseconds")
        .required(false)
        .global(true)
        .value_parser(value_parser!(u64).range(1..))
    )
    .arg(
        arg!(--"fail-probe" "Readiness probe reports a failure instead of ready")
        .global(true)
        .action(ArgAction::SetTrue)
    )
    .arg(
        arg!(-v --verbose "Enable verbose logging")
        .global(true)
        .action(ArgAction::SetTrue)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = build()
            .try_get_matches_from([
                "pitp",
                "script",
                "--json",
                "--lang",
                "ar",
                "--mode",
                "hospital",
                "--fail-probe",
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "script");
        assert!(sub.get_flag("json"));
        assert_eq!(sub.get_one::<UiLanguage>("lang"), Some(&UiLanguage::Arabic));
        assert_eq!(
            sub.get_one::<FacilityMode>("mode"),
            Some(&FacilityMode::Hospital)
        );
        assert!(sub.get_flag("fail-probe"));
    }

    #[test]
    fn test_timing_flags_are_optional_and_positive() {
        let matches = build().try_get_matches_from(["pitp"]).unwrap();
        assert!(matches.get_one::<u64>("readiness-delay").is_none());
        assert!(!matches.get_flag("verbose"));

        let matches = build()
            .try_get_matches_from(["pitp", "--checklist-tick", "700"])
            .unwrap();
        assert_eq!(matches.get_one::<u64>("checklist-tick"), Some(&700));

        assert!(
            build()
                .try_get_matches_from(["pitp", "--indicator-tick", "0"])
                .is_err()
        );
    }
}
