//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL could not be used for a WebSocket connection
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The server answered the handshake with an HTTP error status
    #[error("Server rejected the connection (HTTP {0})")]
    Rejected(u16),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
}
