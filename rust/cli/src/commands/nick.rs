//! Nick command handler: set the display name used on the leaderboard.

use std::io::Write;

use crate::error::CliError;
use crate::ui;
use crate::validation::validate_nickname;

/// Handle the nick command.
///
/// Validates the name against the spam filter before touching the store;
/// setting a nickname creates the user's row when it does not exist yet.
pub fn handle_nick_command(
    user: i64,
    name: &str,
    db: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let name = name.trim();
    if let Err(msg) = validate_nickname(name) {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    let service = super::open_service(db, err)?;
    if let Err(e) = service.set_nickname(user, name) {
        ui::write_error(err, &format!("Failed to save nickname: {}", e))?;
        return Err(e.into());
    }

    writeln!(out, "Your nickname '{}' has been saved!", name)?;
    Ok(())
}
