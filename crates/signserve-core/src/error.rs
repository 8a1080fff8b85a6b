//! Error types for SignServe

/// Result type alias using SignServe's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SignServe operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Artifact bundle errors (fatal at startup)
    #[error("artifact error: {0}")]
    Load(String),

    /// Request validation errors (recoverable, per-request)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Classifier execution errors
    #[error("inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised while checking a feature map against the model schema.
///
/// These are the only errors a well-formed request can legitimately
/// trigger; the server maps them to a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The request carried the wrong number of features
    #[error("expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    /// A feature required by the schema was absent
    #[error("missing feature: {0}")]
    MissingFeature(String),
}

impl Error {
    /// Create a new artifact/load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True if this error came from request validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_descriptive_messages() {
        let err = ValidationError::FeatureCountMismatch {
            expected: 17,
            actual: 16,
        };
        assert_eq!(err.to_string(), "expected 17 features, got 16");

        let err = ValidationError::MissingFeature("thumb_Left".to_string());
        assert_eq!(err.to_string(), "missing feature: thumb_Left");
    }

    #[test]
    fn validation_errors_convert_into_core_error() {
        let err: Error = ValidationError::MissingFeature("index_finger_Left".to_string()).into();
        assert!(err.is_validation());
        assert!(!Error::inference("boom").is_validation());
    }
}
