//! Error types for the test runner
//!
//! Session failures are surfaced unchanged; server-side validation and
//! malformed result payloads get their own variants so callers can tell
//! a broken connection from a broken test page.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Session Errors ===
    #[error("Session error: {0}")]
    Session(String),

    #[error("Failed to open session against '{endpoint}': {reason}")]
    SessionOpenFailed { endpoint: String, reason: String },

    #[error("Session already closed. Create a new runner to continue")]
    SessionClosed,

    // === Server Validation Errors ===
    #[error("Server rejected the request: {0}")]
    Validation(String),

    // === Result Decoding Errors ===
    #[error("Failed to decode test result payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid '{cell}' value in list row {row}: '{value}'")]
    RowData {
        row: usize,
        cell: String,
        value: String,
    },

    // === Endpoint Errors ===
    #[error("Invalid server endpoint: {0}")]
    Endpoint(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a session error from any displayable cause
    pub fn session<E: std::fmt::Display>(cause: E) -> Self {
        Self::Session(cause.to_string())
    }

    /// Create a validation error from the server-supplied messages
    pub fn validation<S: AsRef<str>>(messages: &[S]) -> Self {
        Self::Validation(
            messages
                .iter()
                .map(|m| m.as_ref())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Create a row data error for a cell that failed to parse
    pub fn row_data(row: usize, cell: &str, value: &str) -> Self {
        Self::RowData {
            row,
            cell: cell.to_string(),
            value: value.to_string(),
        }
    }
}
