//! Centralized error types for inboxShell.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::compose::ComposeError;

/// All errors produced by the inboxShell library.
#[derive(Error, Debug)]
pub enum ClientError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A frame could not be encoded or decoded as JSON.
    #[error("Invalid JSON frame: {0}")]
    Json(#[from] serde_json::Error),

    /// The WebSocket transport failed.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The configured server URL is not a usable WebSocket endpoint.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The compose form failed validation before anything was sent.
    #[error(transparent)]
    Validation(#[from] ComposeError),

    /// The server answered with an `error` message.
    #[error("Server error: {0}")]
    Server(String),

    /// No reply arrived within the configured time.
    #[error("Timed out after {0} ms waiting for the server")]
    Timeout(u64),

    /// The connection closed before the expected reply arrived.
    #[error("Connection closed by server")]
    ConnectionClosed,

    /// An internal channel was dropped (the runtime has shut down).
    #[error("Client runtime is no longer running")]
    ChannelClosed,
}

/// Convenience alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
