//! Error types for the CLI application.
//!
//! This module defines the error types used throughout the CLI for better
//! error propagation and handling.

use std::fmt;

/// Custom error type for CLI operations.
///
/// This enum encompasses all error types that can occur during CLI execution,
/// allowing for proper error propagation using the `?` operator.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Game service or storage error
    Service(String),

    /// Session cut short before all requested rounds completed
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Service(msg) => write!(f, "Service error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Automatic conversion from std::io::Error to CliError
impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

// Conversion from service-layer errors (session, store, engine)
impl From<pontoon_service::ServiceError> for CliError {
    fn from(error: pontoon_service::ServiceError) -> Self {
        CliError::Service(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_io_error() {
        let error = CliError::Io(std::io::Error::other("disk gone"));
        assert_eq!(error.to_string(), "I/O error: disk gone");
    }

    #[test]
    fn test_display_invalid_input() {
        let error = CliError::InvalidInput("rounds must be >= 1".to_string());
        assert_eq!(error.to_string(), "Invalid input: rounds must be >= 1");
    }

    #[test]
    fn test_service_error_converts_with_message() {
        let service_err = pontoon_service::ServiceError::EmptyNickname;
        let error: CliError = service_err.into();
        match error {
            CliError::Service(msg) => assert!(msg.contains("empty")),
            other => panic!("expected Service variant, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_preserves_source() {
        use std::error::Error;
        let error = CliError::Io(std::io::Error::other("inner"));
        assert!(error.source().is_some());
        assert!(CliError::Config("x".to_string()).source().is_none());
    }
}
