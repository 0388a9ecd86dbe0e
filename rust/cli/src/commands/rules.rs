//! Rules command handler: print how the table plays.

use std::io::Write;

use crate::error::CliError;

/// Handle the rules command.
pub fn handle_rules_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Blackjack rules:")?;
    writeln!(
        out,
        "1. The goal is to score 21 points, or as close as possible without going over."
    )?;
    writeln!(
        out,
        "2. Number cards count their face value, J/Q/K count 10, and an ace counts 11 unless that busts the hand, then 1."
    )?;
    writeln!(
        out,
        "3. Each turn you either hit (take a card) or stand. Going over 21 loses immediately."
    )?;
    writeln!(
        out,
        "4. The dealer draws until reaching at least 17. If the dealer busts, you win."
    )?;
    writeln!(
        out,
        "5. The hand closer to 21 wins; equal scores are a push."
    )?;
    Ok(())
}
