//! Error taxonomy for the gate pipeline.
//!
//! Acquisition problems (`LoadError`) are always recovered locally by the
//! loader and never cross the hook boundary; only `GateError` can.

/// Errors from a single snapshot read attempt.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file is missing, zero-length, or whitespace-only — the external
    /// writer has not finished producing it yet.
    #[error("snapshot not ready")]
    NotReady,

    #[error("snapshot read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can reach the hook boundary.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = LoadError::NotReady;
        assert_eq!(err.to_string(), "snapshot not ready");

        let err = LoadError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "locked",
        ));
        assert!(err.to_string().contains("snapshot read failed"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err = LoadError::from(parse_err);
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().contains("snapshot parse failed"));
    }
}
