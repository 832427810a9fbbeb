//! Error types for the Disco application.

use thiserror::Error;

/// A shared error type for configuration, secrets and storage plumbing.
///
/// Per-submission failures use the narrower types below ([`SubmitError`] and
/// friends) so callers can tell which external call failed.
#[derive(Error, Debug, Clone)]
pub enum DiscoError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or unusable credentials
    #[error("Security error: {0}")]
    Security(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DiscoError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a security error
    pub fn is_security(&self) -> bool {
        matches!(self, Self::Security(_))
    }
}

impl From<std::io::Error> for DiscoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DiscoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DiscoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for DiscoError {
    fn from(err: minijinja::Error) -> Self {
        Self::Config(format!("prompt template: {err}"))
    }
}

/// A type alias for `Result<T, DiscoError>`.
pub type Result<T> = std::result::Result<T, DiscoError>;

/// Input rejected before any external call was made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing context")]
    MissingContext,
    #[error("empty response")]
    EmptyResponse,
}

/// Failure of the text-generation call. No analysis exists when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Transport-level failure (connect, timeout, TLS, ...)
    #[error("generation request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status
    #[error("generation service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The provider answered but the body could not be decoded
    #[error("failed to parse generation response: {0}")]
    Parse(String),

    /// The provider answered without any text
    #[error("generation service returned no content")]
    EmptyContent,
}

/// Failure of the tabular-store append call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Token exchange or credential problem
    #[error("store authentication failed: {0}")]
    Auth(String),

    /// The named workbook could not be resolved
    #[error("workbook not found: {0}")]
    WorkbookNotFound(String),

    /// The store answered with a non-success status
    #[error("store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure
    #[error("store request failed: {0}")]
    Request(String),
}

/// Outcome of a failed submission.
///
/// `Generation` means no analysis was ever produced. `Append` means the
/// analysis was produced but never saved; it is carried here so the caller can
/// still show it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("analysis was generated but not saved: {source}")]
    Append {
        analysis: String,
        #[source]
        source: StoreError,
    },

    /// The prompt template failed to render
    #[error("prompt rendering failed: {0}")]
    Prompt(String),
}

impl SubmitError {
    /// Returns true if an external call was attempted before the failure.
    pub fn reached_external_service(&self) -> bool {
        matches!(self, Self::Generation(_) | Self::Append { .. })
    }

    /// Analysis text that was generated but lost, if any.
    pub fn unsaved_analysis(&self) -> Option<&str> {
        match self {
            Self::Append { analysis, .. } => Some(analysis),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::MissingContext.to_string(), "missing context");
        assert_eq!(ValidationError::EmptyResponse.to_string(), "empty response");
    }

    #[test]
    fn test_submit_error_keeps_underlying_cause() {
        let err = SubmitError::from(GenerationError::Http {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        });
        assert!(err.to_string().contains("Incorrect API key provided"));
        assert!(err.unsaved_analysis().is_none());
        assert!(err.reached_external_service());
    }

    #[test]
    fn test_append_error_exposes_analysis() {
        let err = SubmitError::Append {
            analysis: "1) Core challenge: slow review".to_string(),
            source: StoreError::Http {
                status: 429,
                message: "Quota exceeded".to_string(),
            },
        };
        assert_eq!(err.unsaved_analysis(), Some("1) Core challenge: slow review"));
        assert!(err.to_string().contains("Quota exceeded"));
    }

    #[test]
    fn test_validation_does_not_reach_external_service() {
        let err = SubmitError::from(ValidationError::EmptyResponse);
        assert!(!err.reached_external_service());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "secret.json");
        let err: DiscoError = io.into();
        assert!(matches!(err, DiscoError::Io { .. }));
        assert!(err.to_string().contains("NotFound"));
    }
}
