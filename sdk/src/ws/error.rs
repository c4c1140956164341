//! WebSocket error types.
//!
//! Transport-level failures only. Application errors travel inside the
//! response payload and are never converted into a [`WsError`].

/// WebSocket errors.
#[derive(Debug, thiserror::Error)]
pub enum WsError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// WebSocket protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Failed to serialize message.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Request does not serialize to a JSON object.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Not connected.
    #[error("not connected")]
    NotConnected,

    /// Connection closed before a response arrived.
    #[error("connection closed")]
    Closed,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for WsError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}
