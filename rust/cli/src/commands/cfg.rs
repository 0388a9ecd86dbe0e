//! Cfg command handler: show the resolved configuration and where each
//! value came from.

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

/// Handle the cfg command.
///
/// Prints the effective configuration as JSON, with a `source` tag per
/// value (`default`, `file`, or `env`) so surprising settings can be
/// traced back to their origin.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let payload = serde_json::json!({
        "db_path": { "value": resolved.config.db_path, "source": resolved.sources.db_path },
        "seed": { "value": resolved.config.seed, "source": resolved.sources.seed },
        "ascii": { "value": resolved.config.ascii, "source": resolved.sources.ascii },
    });
    let rendered = serde_json::to_string_pretty(&payload)
        .map_err(|e| CliError::Config(format!("Failed to render configuration: {}", e)))?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-driven overrides are covered by the integration tests,
    // which guard PONTOON_* mutation behind a lock.
    #[test]
    fn cfg_emits_defaults_as_json_with_sources() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_cfg_command(&mut out, &mut err).unwrap();

        let output = String::from_utf8(out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["db_path"]["value"], "pontoon.db");
        assert_eq!(parsed["db_path"]["source"], "default");
        assert_eq!(parsed["seed"]["value"], serde_json::Value::Null);
        assert_eq!(parsed["ascii"]["value"], false);
        assert!(err.is_empty());
    }
}
