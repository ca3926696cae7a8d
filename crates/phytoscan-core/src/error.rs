//! Error types for Phytoscan

/// Result type alias using Phytoscan's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Phytoscan operations
///
/// The classification engine itself never fails; these errors come from
/// loading reference data, reading configuration, and the external
/// capture/recognition collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed or inconsistent reference data
    #[error("knowledge base error: {0}")]
    KnowledgeBase(String),

    /// Image capture failed before any text was available
    #[error("capture failed: {0}")]
    Capture(String),

    /// Text recognition failed on a captured image
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// Filesystem/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new knowledge base error
    pub fn knowledge_base(msg: impl Into<String>) -> Self {
        Self::KnowledgeBase(msg.into())
    }

    /// Create a new capture error
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Create a new recognition error
    pub fn recognition(msg: impl Into<String>) -> Self {
        Self::Recognition(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error came from one of the external collaborators
    /// (capture or recognition) and the caller may simply retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Capture(_) | Self::Recognition(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_errors_are_distinct() {
        let capture = Error::capture("camera not ready");
        let recognition = Error::recognition("engine exited with status 1");

        assert_eq!(capture.to_string(), "capture failed: camera not ready");
        assert_eq!(
            recognition.to_string(),
            "recognition failed: engine exited with status 1"
        );
        assert!(capture.is_recoverable());
        assert!(recognition.is_recoverable());
        assert!(!Error::knowledge_base("empty").is_recoverable());
    }
}
