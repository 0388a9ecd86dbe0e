//! UI helper functions for terminal output formatting.
//!
//! This module provides utility functions for consistent user interface output
//! across CLI commands, including error and warning messages.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_formats_consistently() {
        let mut buf: Vec<u8> = Vec::new();
        write_error(&mut buf, "oops").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: oops\n");
    }

    #[test]
    fn display_warning_formats_consistently() {
        let mut buf: Vec<u8> = Vec::new();
        display_warning(&mut buf, "input ended early").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "WARNING: input ended early\n");
    }
}
