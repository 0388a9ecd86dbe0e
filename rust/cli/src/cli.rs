//! Command-line argument definitions for the pontoon binary.
//!
//! This module holds the clap parser types: the top-level [`PontoonCli`]
//! struct and the [`Commands`] enum with one variant per subcommand. Parsing
//! and dispatch live in [`crate::run`].

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `pontoon` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pontoon",
    version,
    about = "Blackjack at the terminal: play rounds, track stats, climb the leaderboard"
)]
pub struct PontoonCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// All subcommands understood by the CLI.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play one or more interactive blackjack rounds
    Play {
        /// User id the rounds are recorded under
        #[arg(long)]
        user: i64,
        /// Number of rounds to play (default 1)
        #[arg(long)]
        rounds: Option<u32>,
        /// Deterministic deck seed; round N uses seed + N
        #[arg(long)]
        seed: Option<u64>,
        /// Stats database path (overrides config)
        #[arg(long)]
        db: Option<String>,
        /// Append resolved rounds to this JSONL journal file
        #[arg(long)]
        journal: Option<String>,
        /// Render cards with ASCII suit letters instead of Unicode symbols
        #[arg(long)]
        ascii: bool,
    },
    /// Show one user's profile and lifetime record
    Profile {
        /// User id to look up
        #[arg(long)]
        user: i64,
        /// Stats database path (overrides config)
        #[arg(long)]
        db: Option<String>,
    },
    /// Set the nickname shown on the leaderboard
    Nick {
        /// User id the nickname belongs to
        #[arg(long)]
        user: i64,
        /// The nickname to store
        #[arg(long)]
        name: String,
        /// Stats database path (overrides config)
        #[arg(long)]
        db: Option<String>,
    },
    /// Show the leaderboard of named users ordered by wins
    Top {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Stats database path (overrides config)
        #[arg(long)]
        db: Option<String>,
        /// Emit the leaderboard as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the table rules
    Rules,
    /// Display current configuration settings and their sources
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_six_subcommands_parse() {
        let commands = vec![
            vec!["pontoon", "play", "--user", "7"],
            vec!["pontoon", "profile", "--user", "7"],
            vec!["pontoon", "nick", "--user", "7", "--name", "ada"],
            vec!["pontoon", "top"],
            vec!["pontoon", "rules"],
            vec!["pontoon", "cfg"],
        ];

        for cmd_args in commands {
            let result = PontoonCli::try_parse_from(&cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
    }

    #[test]
    fn test_play_accepts_all_flags() {
        let cli = PontoonCli::try_parse_from([
            "pontoon", "play", "--user", "7", "--rounds", "3", "--seed", "42", "--db",
            "stats.db", "--journal", "rounds.jsonl", "--ascii",
        ])
        .unwrap();

        match cli.cmd {
            Commands::Play {
                user,
                rounds,
                seed,
                db,
                journal,
                ascii,
            } => {
                assert_eq!(user, 7);
                assert_eq!(rounds, Some(3));
                assert_eq!(seed, Some(42));
                assert_eq!(db.as_deref(), Some("stats.db"));
                assert_eq!(journal.as_deref(), Some("rounds.jsonl"));
                assert!(ascii);
            }
            other => panic!("Expected Commands::Play, got {:?}", other),
        }
    }

    #[test]
    fn test_play_requires_user() {
        let result = PontoonCli::try_parse_from(["pontoon", "play"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_top_limit_defaults_to_ten() {
        let cli = PontoonCli::try_parse_from(["pontoon", "top"]).unwrap();
        match cli.cmd {
            Commands::Top { limit, json, .. } => {
                assert_eq!(limit, 10);
                assert!(!json);
            }
            other => panic!("Expected Commands::Top, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        let result = PontoonCli::try_parse_from(["pontoon", "deal"]);
        assert!(result.is_err());
    }
}
