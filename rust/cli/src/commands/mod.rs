//! Command handlers for the pontoon CLI.
//!
//! Each submodule implements one subcommand. Handlers take explicit output
//! streams so tests can capture what the user would see, and return
//! `Result<(), CliError>` so the dispatcher can map failures to exit codes.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use pontoon_service::{GameService, StatsStore};

use crate::config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;

mod cfg;
mod nick;
mod play;
mod profile;
mod rules;
mod top;

pub use cfg::handle_cfg_command;
pub use nick::handle_nick_command;
pub use play::handle_play_command;
pub use profile::handle_profile_command;
pub use rules::handle_rules_command;
pub use top::handle_top_command;

/// Open the stats store behind a `GameService`, resolving the database path
/// from the `--db` flag or the loaded configuration.
pub(crate) fn open_service(
    db: Option<String>,
    err: &mut dyn Write,
) -> Result<GameService, CliError> {
    let cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };
    let db_path = db.unwrap_or(cfg.db_path);
    ensure_parent_dir(Path::new(&db_path)).map_err(CliError::Config)?;
    let store = match StatsStore::open(&db_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("Failed to open stats store {}: {}", db_path, e);
            ui::write_error(err, &msg)?;
            return Err(CliError::Service(msg));
        }
    };
    Ok(GameService::new(Arc::new(store)))
}
