//! Top command handler: the leaderboard of named players.

use std::io::Write;

use crate::error::CliError;
use crate::ui;

/// Handle the top command.
///
/// Lists up to `limit` named players ordered by wins. `--json` emits the
/// raw records instead of the text table, for scripting.
pub fn handle_top_command(
    limit: u32,
    db: Option<String>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let service = super::open_service(db, err)?;
    let ranked = match service.top_by_wins(limit) {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Failed to load leaderboard: {}", e))?;
            return Err(e.into());
        }
    };

    if json {
        let payload = serde_json::to_string_pretty(&ranked)
            .map_err(|e| CliError::Service(format!("Failed to render leaderboard: {}", e)))?;
        writeln!(out, "{}", payload)?;
        return Ok(());
    }

    if ranked.is_empty() {
        writeln!(out, "No ranked players yet.")?;
        return Ok(());
    }

    writeln!(out, "Top players by wins:")?;
    for (i, stats) in ranked.iter().enumerate() {
        let name = stats.nickname.as_deref().unwrap_or("(unnamed)");
        let ratio = if stats.games > 0 {
            f64::from(stats.wins) / f64::from(stats.games)
        } else {
            0.0
        };
        writeln!(
            out,
            "{}. {} - Games: {}, Wins: {}, W/G: {:.2}",
            i + 1,
            name,
            stats.games,
            stats.wins,
            ratio
        )?;
    }
    Ok(())
}
