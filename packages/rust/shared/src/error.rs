//! Error types for AgentSim.
//!
//! Library crates use [`AgentSimError`] via `thiserror`.
//! The app crate (cli) wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all AgentSim operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentSimError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The caller supplied an empty or whitespace-only query.
    ///
    /// Raised before any pipeline stage is entered; no collaborator is
    /// invoked for an invalid query.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The API key environment variable is unset or empty.
    ///
    /// Detected when the generation client is constructed, before any
    /// request is attempted. Distinct from [`AgentSimError::Upstream`].
    #[error("missing credential: {message}")]
    MissingCredential { message: String },

    /// The external text-generation call failed: network error, non-success
    /// status, or an unusable payload. Terminal for the invocation that
    /// raised it; no retry is attempted.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AgentSimError>;

impl AgentSimError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an invalid-input error from any displayable message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Create a missing-credential error from any displayable message.
    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self::MissingCredential {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = AgentSimError::config("missing model id");
        assert_eq!(err.to_string(), "config error: missing model id");

        let err = AgentSimError::invalid_input("query is empty");
        assert_eq!(err.to_string(), "invalid input: query is empty");

        let err = AgentSimError::Upstream("HTTP 500".into());
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn credential_error_is_distinct_from_upstream() {
        let cred = AgentSimError::missing_credential("GEMINI_API_KEY not set");
        assert!(matches!(cred, AgentSimError::MissingCredential { .. }));
        assert!(!matches!(cred, AgentSimError::Upstream(_)));
    }
}
