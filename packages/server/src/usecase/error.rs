//! UseCase 層のエラー型

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("failed to encode announcement: {0}")]
    Encode(String),

    #[error("failed to broadcast announcement: {0}")]
    BroadcastFailed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("failed to encode announcement: {0}")]
    Encode(String),

    #[error("failed to broadcast announcement: {0}")]
    BroadcastFailed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("failed to encode message: {0}")]
    Encode(String),

    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(String),
}
