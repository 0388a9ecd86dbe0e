//! Interactive play command handler.
//!
//! This module implements the `play` command: one or more blackjack rounds
//! played at the terminal against the house dealer. Each round deals from a
//! fresh shuffled deck; resolved rounds are settled into the stats store
//! before the next one starts, so a session cut short loses nothing that
//! already finished.
//!
//! ## Environment Variables
//!
//! - `PONTOON_PLAY_BREAK_AFTER`: Break after N completed rounds (for testing)
//!
//! ## Input
//!
//! The player acts with `h`/`hit`, `s`/`stand`, and `q`/`quit`. Invalid
//! input re-prompts; EOF on stdin abandons the current round and ends the
//! session gracefully.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use pontoon_engine::deck::Deck;
use pontoon_engine::journal::{RoundJournal, RoundRecord};
use pontoon_service::{ActionReply, GameService, StatsStore};

use crate::config;
use crate::error::CliError;
use crate::formatters::{
    format_dealer_hand, format_hand, format_outcome, format_record, supports_unicode,
};
use crate::io_utils::{ensure_parent_dir, read_stdin_line};
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

/// How one player turn sequence ended.
enum TurnEnd {
    /// The round resolved; the reply carries the final table state.
    Resolved(ActionReply),
    /// The user asked to leave with `q`.
    Quit,
    /// The input stream ended mid-round.
    Eof,
}

/// Handle the play command.
///
/// Plays `rounds` interactive rounds for `user`, recording every resolved
/// round in the stats store and, when `journal` is set, appending it to a
/// JSONL journal file.
///
/// # Arguments
///
/// * `user` - User id the rounds are recorded under
/// * `rounds` - Number of rounds to play (defaults to 1)
/// * `seed` - Optional deck seed; round N shuffles with `seed + N`
/// * `db` - Optional stats database path, overriding the configuration
/// * `journal` - Optional JSONL journal path for resolved rounds
/// * `ascii` - Force ASCII card rendering
/// * `out` - Output stream for game rendering
/// * `err` - Error stream for error and warning messages
/// * `stdin` - Input stream for player actions
///
/// # Returns
///
/// * `Ok(())` when the session ends normally (including quit and EOF)
/// * `Err(CliError)` on invalid arguments, storage failures, or I/O errors
#[allow(clippy::too_many_arguments)]
pub fn handle_play_command(
    user: i64,
    rounds: Option<u32>,
    seed: Option<u64>,
    db: Option<String>,
    journal: Option<String>,
    ascii: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    execute_play_command(user, rounds, seed, db, journal, ascii, out, err, stdin)
}

#[allow(clippy::too_many_arguments)]
fn execute_play_command(
    user: i64,
    rounds: Option<u32>,
    seed: Option<u64>,
    db: Option<String>,
    journal: Option<String>,
    ascii: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let rounds = rounds.unwrap_or(1);
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };
    let db_path = db.unwrap_or(cfg.db_path);
    let ascii = ascii || cfg.ascii || !supports_unicode();
    let session_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let break_after = std::env::var("PONTOON_PLAY_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u32>().ok());

    ensure_parent_dir(Path::new(&db_path)).map_err(CliError::Config)?;
    let store = match StatsStore::open(&db_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("Failed to open stats store {}: {}", db_path, e);
            ui::write_error(err, &msg)?;
            return Err(CliError::Service(msg));
        }
    };
    let service = GameService::new(Arc::new(store));

    let mut journal = match journal {
        Some(path) => match RoundJournal::create(&path) {
            Ok(j) => Some(j),
            Err(e) => {
                ui::write_error(err, &format!("Failed to open journal {}: {}", path, e))?;
                return Err(CliError::Io(e));
            }
        },
        None => None,
    };

    writeln!(
        out,
        "play: user={} rounds={} seed={}",
        user, rounds, session_seed
    )?;

    let mut played = 0u32;
    for round_idx in 0..rounds {
        let round_seed = session_seed.wrapping_add(u64::from(round_idx));
        let mut deck = Deck::new_with_seed(round_seed);
        deck.shuffle();

        writeln!(out)?;
        writeln!(out, "Round {}/{}", round_idx + 1, rounds)?;
        let opening = match service.start_round(user, deck) {
            Ok(reply) => reply,
            Err(e) => {
                ui::write_error(err, &format!("Failed to start round: {}", e))?;
                return Err(e.into());
            }
        };
        render_table(out, &opening, ascii)?;

        let end = if opening.outcome.is_some() {
            TurnEnd::Resolved(opening)
        } else {
            play_turns(&service, user, ascii, out, err, stdin)?
        };

        match end {
            TurnEnd::Resolved(reply) => {
                if let Some(outcome) = reply.outcome {
                    writeln!(out, "{}", format_outcome(&outcome))?;
                }
                if let Some(j) = journal.as_mut() {
                    record_round(j, user, round_seed, &reply)?;
                }
                played += 1;
            }
            TurnEnd::Quit => {
                service.abandon(user).map_err(CliError::from)?;
                writeln!(out, "Game abandoned. Leaving the table.")?;
                break;
            }
            TurnEnd::Eof => {
                service.abandon(user).map_err(CliError::from)?;
                ui::display_warning(
                    err,
                    &format!("Input ended after {} of {} rounds", played, rounds),
                )?;
                break;
            }
        }

        if let Some(b) = break_after
            && played == b
        {
            writeln!(out, "Interrupted: played {}/{}", played, rounds)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: played {}/{}",
                played, rounds
            )));
        }
    }

    writeln!(out)?;
    writeln!(out, "Session rounds={} played={}", rounds, played)?;
    if played > 0 {
        let stats = service.stats(user).map_err(CliError::from)?;
        writeln!(out, "Record: {}", format_record(&stats))?;
    }
    Ok(())
}

/// Prompt-and-apply loop for one round (module-private helper)
///
/// Reads actions until the round resolves, the user quits, or the input
/// stream ends. Invalid input re-prompts without consuming a turn.
fn play_turns(
    service: &GameService,
    user: i64,
    ascii: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<TurnEnd, CliError> {
    loop {
        write!(out, "Enter action (h/s/q): ")?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            return Ok(TurnEnd::Eof);
        };
        match parse_player_action(&input) {
            ParseResult::Action(action) => {
                let reply = match service.handle_action(user, action) {
                    Ok(reply) => reply,
                    Err(e) => {
                        ui::write_error(err, &format!("Action failed: {}", e))?;
                        return Err(e.into());
                    }
                };
                render_table(out, &reply, ascii)?;
                if reply.outcome.is_some() {
                    return Ok(TurnEnd::Resolved(reply));
                }
            }
            ParseResult::Quit => return Ok(TurnEnd::Quit),
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
            }
        }
    }
}

/// Render both hands the way the player is allowed to see them.
fn render_table(out: &mut dyn Write, reply: &ActionReply, ascii: bool) -> Result<(), CliError> {
    writeln!(
        out,
        "Your cards: {} (Score: {})",
        format_hand(&reply.player_cards, ascii),
        reply.player_score
    )?;
    match reply.dealer_score {
        Some(score) => writeln!(
            out,
            "Dealer's cards: {} (Score: {})",
            format_hand(&reply.dealer_cards, ascii),
            score
        )?,
        None => writeln!(
            out,
            "Dealer's cards: {}",
            format_dealer_hand(&reply.dealer_cards, reply.dealer_hidden, ascii)
        )?,
    }
    Ok(())
}

/// Append one resolved round to the journal.
fn record_round(
    journal: &mut RoundJournal,
    user: i64,
    seed: u64,
    reply: &ActionReply,
) -> Result<(), CliError> {
    let (Some(outcome), Some(dealer_score)) = (reply.outcome, reply.dealer_score) else {
        return Ok(());
    };
    let record = RoundRecord {
        round_id: journal.next_id(),
        user_id: user,
        seed: Some(seed),
        player_cards: reply.player_cards.clone(),
        dealer_cards: reply.dealer_cards.clone(),
        player_score: reply.player_score,
        dealer_score,
        outcome,
        ts: None,
    };
    journal.write(&record)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use pontoon_engine::cards::{Card, Rank, Suit};
    use pontoon_engine::round::Outcome;
    use serial_test::serial;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card { suit, rank }
    }

    fn push_on_stand_deck() -> Deck {
        Deck::from_cards(vec![
            card(Rank::Nine, Suit::Spades),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Eight, Suit::Diamonds),
        ])
    }

    fn bust_after_hit_deck() -> Deck {
        Deck::from_cards(vec![
            card(Rank::Nine, Suit::Spades),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Seven, Suit::Diamonds),
            card(Rank::Five, Suit::Diamonds),
        ])
    }

    fn service_with_round(deck: Deck) -> GameService {
        let service = GameService::new(Arc::new(StatsStore::open_in_memory().unwrap()));
        service.start_round(1, deck).unwrap();
        service
    }

    /// Enough hits to bust any hand, then a stand as backstop. Rounds always
    /// terminate on this input no matter what the shuffle dealt.
    fn hit_until_bust_input(rounds: u32) -> String {
        let per_round = format!("{}s\n", "h\n".repeat(20));
        per_round.repeat(rounds as usize)
    }

    #[test]
    fn turns_resolve_on_stand_with_forced_deck() {
        let service = service_with_round(push_on_stand_deck());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"s\n");

        let end = play_turns(&service, 1, true, &mut out, &mut err, &mut stdin).unwrap();
        match end {
            TurnEnd::Resolved(reply) => {
                assert_eq!(reply.outcome, Some(Outcome::Push));
                assert_eq!(reply.dealer_score, Some(18));
            }
            _ => panic!("expected a resolved round"),
        }

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Enter action (h/s/q): "));
        assert!(output.contains("(Score: 18)"), "dealer hand revealed: {}", output);
    }

    #[test]
    fn turns_resolve_on_busting_hit() {
        let service = service_with_round(bust_after_hit_deck());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"h\n");

        let end = play_turns(&service, 1, true, &mut out, &mut err, &mut stdin).unwrap();
        match end {
            TurnEnd::Resolved(reply) => {
                assert_eq!(reply.outcome, Some(Outcome::PlayerBust));
                assert_eq!(reply.player_score, 23);
            }
            _ => panic!("expected a resolved round"),
        }
    }

    #[test]
    fn invalid_input_reprompts_without_spending_the_turn() {
        let service = service_with_round(push_on_stand_deck());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"double\n\ns\n");

        let end = play_turns(&service, 1, true, &mut out, &mut err, &mut stdin).unwrap();
        assert!(matches!(end, TurnEnd::Resolved(_)));

        let err_output = String::from_utf8(err).unwrap();
        assert!(err_output.contains("Unrecognized action 'double'"));
        assert!(err_output.contains("Empty input"));

        // three prompts: the two rejected inputs plus the stand
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Enter action").count(), 3);
    }

    #[test]
    fn quit_and_eof_end_the_turn_loop() {
        let service = service_with_round(push_on_stand_deck());
        let mut out = Vec::new();
        let mut err = Vec::new();

        let mut stdin = Cursor::new(b"q\n");
        let end = play_turns(&service, 1, true, &mut out, &mut err, &mut stdin).unwrap();
        assert!(matches!(end, TurnEnd::Quit));

        let mut stdin = Cursor::new(b"");
        let end = play_turns(&service, 1, true, &mut out, &mut err, &mut stdin).unwrap();
        assert!(matches!(end, TurnEnd::Eof));
    }

    // Handler-level tests are #[serial]: the handler reads configuration
    // from the environment, and the break-hook test mutates it.
    #[test]
    #[serial]
    fn session_completes_every_round_and_records_stats() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("stats.db").to_string_lossy().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input = hit_until_bust_input(2);
        let mut stdin = Cursor::new(input.into_bytes());

        let result = handle_play_command(
            7,
            Some(2),
            Some(42),
            Some(db.clone()),
            None,
            true,
            &mut out,
            &mut err,
            &mut stdin,
        );
        assert!(result.is_ok(), "session should complete: {:?}", result);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("play: user=7 rounds=2 seed=42"));
        assert!(output.contains("Session rounds=2 played=2"));
        assert!(output.contains("Record: "));

        let store = StatsStore::open(&db).unwrap();
        let stats = store.get(7).unwrap();
        assert_eq!(stats.games, 2);
        assert_eq!(stats.games, stats.wins + stats.losses + stats.ties);
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("stats.db").to_string_lossy().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"");

        let result = handle_play_command(
            7,
            Some(0),
            None,
            Some(db),
            None,
            true,
            &mut out,
            &mut err,
            &mut stdin,
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let err_output = String::from_utf8(err).unwrap();
        assert!(err_output.contains("rounds must be >= 1"));
    }

    #[test]
    #[serial]
    fn eof_ends_the_session_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("stats.db").to_string_lossy().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"");

        // whatever the shuffle deals (immediate natural or an abandoned
        // round), EOF must end the session with success
        let result = handle_play_command(
            7,
            Some(1),
            Some(11),
            Some(db.clone()),
            None,
            true,
            &mut out,
            &mut err,
            &mut stdin,
        );
        assert!(result.is_ok());

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Session rounds=1"));

        let store = StatsStore::open(&db).unwrap();
        assert!(store.get(7).unwrap().games <= 1);
    }

    #[test]
    #[serial]
    fn journal_captures_each_resolved_round() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("stats.db").to_string_lossy().to_string();
        let journal_path = dir.path().join("rounds.jsonl");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input = hit_until_bust_input(1);
        let mut stdin = Cursor::new(input.into_bytes());

        handle_play_command(
            3,
            Some(1),
            Some(42),
            Some(db),
            Some(journal_path.to_string_lossy().to_string()),
            true,
            &mut out,
            &mut err,
            &mut stdin,
        )
        .unwrap();

        let contents = std::fs::read_to_string(&journal_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);

        let record: RoundRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record.user_id, 3);
        assert_eq!(record.seed, Some(42));
        assert!(record.ts.is_some());
    }

    #[test]
    #[serial]
    fn same_seed_replays_the_same_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let mut transcripts = Vec::new();
        for name in ["a.db", "b.db"] {
            let db = dir.path().join(name).to_string_lossy().to_string();
            let mut out = Vec::new();
            let mut err = Vec::new();
            let input = hit_until_bust_input(2);
            let mut stdin = Cursor::new(input.into_bytes());

            handle_play_command(
                5,
                Some(2),
                Some(99),
                Some(db),
                None,
                true,
                &mut out,
                &mut err,
                &mut stdin,
            )
            .unwrap();
            transcripts.push(String::from_utf8(out).unwrap());
        }
        assert_eq!(transcripts[0], transcripts[1]);
    }

    #[test]
    #[serial]
    fn break_hook_interrupts_but_keeps_settled_rounds() {
        // SAFETY: env mutation is confined to #[serial] tests.
        unsafe { std::env::set_var("PONTOON_PLAY_BREAK_AFTER", "1") };

        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("stats.db").to_string_lossy().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input = hit_until_bust_input(2);
        let mut stdin = Cursor::new(input.into_bytes());

        let result = handle_play_command(
            9,
            Some(2),
            Some(42),
            Some(db.clone()),
            None,
            true,
            &mut out,
            &mut err,
            &mut stdin,
        );
        unsafe { std::env::remove_var("PONTOON_PLAY_BREAK_AFTER") };

        assert!(matches!(result, Err(CliError::Interrupted(_))));
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Interrupted: played 1/2"));

        // the completed round was already settled before the break
        let store = StatsStore::open(&db).unwrap();
        assert_eq!(store.get(9).unwrap().games, 1);
    }
}
