//! # Pontoon CLI Library
//!
//! This library provides the command-line interface for the Pontoon
//! blackjack engine: interactive play against the dealer plus stats and
//! leaderboard queries over the shared database.
//!
//! The binary is a thin wrapper around [`run`], which parses arguments and
//! dispatches to one command handler. Handlers write to explicit output
//! streams, so the whole surface is testable without a real terminal.
//!
//! Subcommands:
//! - `play`: play interactive rounds against the dealer
//! - `profile`: show a user's record and balance
//! - `nick`: set the leaderboard display name
//! - `top`: show the leaderboard of named players
//! - `rules`: print how the table plays
//! - `cfg`: show the resolved configuration and its sources

use std::ffi::OsString;
use std::io::Write;

use clap::Parser;
use clap::error::ErrorKind;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
mod macros;
pub mod ui;
pub mod validation;

use cli::{Commands, PontoonCli};
use commands::{
    handle_cfg_command, handle_nick_command, handle_play_command, handle_profile_command,
    handle_rules_command, handle_top_command,
};
pub use error::CliError;

/// Subcommands listed in the short usage block shown on parse errors.
const COMMANDS: [&str; 6] = ["play", "profile", "nick", "top", "rules", "cfg"];

/// Parse `args` and run the selected command, writing to `out` and `err`.
///
/// Returns the process exit code: 0 on success, 2 on errors, 130 when a
/// play session is interrupted mid-way.
pub fn run<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match PontoonCli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            _ => {
                if write!(err, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                write_or_exit!(err, "Pontoon Blackjack CLI");
                write_or_exit!(err, "Usage: pontoon <command> [options]\n");
                write_or_exit!(err, "Commands:");
                for command in COMMANDS {
                    write_or_exit!(err, "  {}", command);
                }
                write_or_exit!(err, "\nFor full help, run: pontoon --help");
                return exit_code::ERROR;
            }
        },
    };

    match cli.cmd {
        Commands::Play {
            user,
            rounds,
            seed,
            db,
            journal,
            ascii,
        } => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            match handle_play_command(
                user, rounds, seed, db, journal, ascii, out, err, &mut input,
            ) {
                Ok(()) => exit_code::SUCCESS,
                Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
                Err(e) => {
                    write_or_exit!(err, "Error: {}", e);
                    exit_code::ERROR
                }
            }
        }
        Commands::Profile { user, db } => match handle_profile_command(user, db, out, err) {
            Ok(()) => exit_code::SUCCESS,
            Err(e) => {
                write_or_exit!(err, "Error: {}", e);
                exit_code::ERROR
            }
        },
        Commands::Nick { user, name, db } => match handle_nick_command(user, &name, db, out, err)
        {
            Ok(()) => exit_code::SUCCESS,
            Err(e) => {
                write_or_exit!(err, "Error: {}", e);
                exit_code::ERROR
            }
        },
        Commands::Top { limit, db, json } => match handle_top_command(limit, db, json, out, err) {
            Ok(()) => exit_code::SUCCESS,
            Err(e) => {
                write_or_exit!(err, "Error: {}", e);
                exit_code::ERROR
            }
        },
        Commands::Rules => match handle_rules_command(out) {
            Ok(()) => exit_code::SUCCESS,
            Err(e) => {
                write_or_exit!(err, "Error: {}", e);
                exit_code::ERROR
            }
        },
        Commands::Cfg => match handle_cfg_command(out, err) {
            Ok(()) => exit_code::SUCCESS,
            Err(e) => {
                write_or_exit!(err, "Error: {}", e);
                exit_code::ERROR
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_cli(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn rules_prints_and_succeeds() {
        let (code, out, err) = run_cli(&["pontoon", "rules"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("Blackjack rules:"));
        assert!(err.is_empty());
    }

    #[test]
    fn help_goes_to_stdout_with_success() {
        let (code, out, _) = run_cli(&["pontoon", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("play"));
        assert!(out.contains("rules"));
    }

    #[test]
    fn version_goes_to_stdout_with_success() {
        let (code, out, _) = run_cli(&["pontoon", "--version"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("pontoon"));
    }

    #[test]
    fn unknown_command_prints_the_usage_block() {
        let (code, out, err) = run_cli(&["pontoon", "deal"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert!(err.contains("Usage: pontoon <command> [options]"));
        for command in COMMANDS {
            assert!(err.contains(command), "usage block must list {}", command);
        }
        assert!(err.contains("For full help, run: pontoon --help"));
    }

    #[test]
    fn missing_required_flag_is_a_usage_error() {
        let (code, _, err) = run_cli(&["pontoon", "play"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.contains("--user"));
    }

    #[test]
    fn top_reports_an_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("stats.db").to_string_lossy().to_string();
        let (code, out, err) = run_cli(&["pontoon", "top", "--db", &db]);
        assert_eq!(code, exit_code::SUCCESS);
        assert_eq!(out, "No ranked players yet.\n");
        assert!(err.is_empty());
    }
}
