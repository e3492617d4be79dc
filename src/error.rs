use thiserror::Error;

/// Unified error type for changie operations
#[derive(Error, Debug)]
pub enum ChangieError {
    /// Storage errors pass through untouched so callers see the original kind and message.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt cancelled: {0}")]
    Cancelled(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in changie
pub type Result<T> = std::result::Result<T, ChangieError>;

impl ChangieError {
    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        ChangieError::Validation(msg.into())
    }

    /// Create a cancellation error naming the prompt that was aborted
    pub fn cancelled(label: impl Into<String>) -> Self {
        ChangieError::Cancelled(label.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangieError::Config(msg.into())
    }

    /// True when the user aborted a prompt rather than entering a bad value.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChangieError::Cancelled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChangieError::config("unknown custom type 'float'");
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown custom type 'float'"
        );
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "bad file");
        let err: ChangieError = io_err.into();
        assert_eq!(err.to_string(), "bad file");
        match err {
            ChangieError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("a: b").unwrap_err();
        let err: ChangieError = yaml_err.into();
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ChangieError::validation("x"), "Validation error"),
            (ChangieError::cancelled("x"), "Prompt cancelled"),
            (ChangieError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_is_cancelled() {
        assert!(ChangieError::cancelled("Body").is_cancelled());
        assert!(!ChangieError::validation("Body").is_cancelled());
    }
}
