//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused or ended the session with an `interrupt` event
    #[error("{0}")]
    Interrupted(String),

    /// Transport error; the runner retries these
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl ClientError {
    /// Whether reconnecting could help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Connection(_))
    }
}
