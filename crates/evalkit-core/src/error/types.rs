//! Core error type and result alias

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for evalkit operations
pub type EvalKitResult<T> = Result<T, EvalKitError>;

/// Main error type for evalkit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalKitError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// The runner failed to start, become ready or stop
    #[error("Runner error: {message}")]
    Runner {
        message: String,
        runner_id: Option<String>,
        context: Option<String>,
    },

    /// The evaluation collaborator failed
    #[error("Evaluation error: {message}")]
    Evaluation {
        message: String,
        exit_code: Option<i32>,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}

impl EvalKitError {
    /// Stable code for logs and programmatic matching
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "EVALKIT_CONFIG",
            Self::Runner { .. } => "EVALKIT_RUNNER",
            Self::Evaluation { .. } => "EVALKIT_EVALUATION",
            Self::Io { .. } => "EVALKIT_IO",
            Self::Json { .. } => "EVALKIT_JSON",
            Self::Other { .. } => "EVALKIT_OTHER",
        }
    }

    /// The human-readable message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Config { message, .. }
            | Self::Runner { message, .. }
            | Self::Evaluation { message, .. }
            | Self::Io { message, .. }
            | Self::Json { message, .. }
            | Self::Other { message, .. } => message,
        }
    }

    /// Optional context about where the error happened
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Runner { context, .. }
            | Self::Evaluation { context, .. }
            | Self::Io { context, .. }
            | Self::Json { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_variant_prefix() {
        let err = EvalKitError::evaluation("dataset not found");
        assert_eq!(err.to_string(), "Evaluation error: dataset not found");
        assert_eq!(err.message(), "dataset not found");
        assert_eq!(err.error_code(), "EVALKIT_EVALUATION");
    }
}
