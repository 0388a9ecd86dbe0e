//! Profile command handler: show one user's record and balance.

use std::io::Write;

use crate::error::CliError;
use crate::ui;

/// Handle the profile command.
///
/// Prints the stored record for `user`. Users the store has never seen get
/// the fresh-player profile; looking them up does not create a row.
pub fn handle_profile_command(
    user: i64,
    db: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let service = super::open_service(db, err)?;
    let stats = match service.stats(user) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &format!("Failed to load profile: {}", e))?;
            return Err(e.into());
        }
    };

    writeln!(out, "Profile: user={}", user)?;
    writeln!(
        out,
        "  Nickname: {}",
        stats.nickname.as_deref().unwrap_or("(not set)")
    )?;
    writeln!(out, "  Games played: {}", stats.games)?;
    writeln!(out, "  Wins: {}", stats.wins)?;
    writeln!(out, "  Losses: {}", stats.losses)?;
    writeln!(out, "  Ties: {}", stats.ties)?;
    writeln!(out, "  Balance: {}", stats.balance)?;
    Ok(())
}
