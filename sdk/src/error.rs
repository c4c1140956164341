//! SDK error types.
//!
//! Provides error types for typed message decoding and the token registry.

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Message does not carry the expected payload.
    #[error("missing field: {0}")]
    MissingField(String),

    /// Invalid account token entry.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Unknown account.
    #[error("unknown account: {0}")]
    UnknownAccount(String),
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SdkError::MissingField("tick".to_string());
        assert_eq!(err.to_string(), "missing field: tick");
    }

    #[test]
    fn test_error_unknown_account() {
        let err = SdkError::UnknownAccount("CR123".to_string());
        assert_eq!(err.to_string(), "unknown account: CR123");
    }

    #[test]
    fn test_error_from_serde() {
        let err = serde_json::from_str::<u64>("nope").map_err(SdkError::from);
        assert!(matches!(err, Err(SdkError::Deserialization(_))));
    }
}
