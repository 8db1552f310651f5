//! Constructor methods for EvalKitError

use std::path::PathBuf;

use super::types::EvalKitError;

impl EvalKitError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new runner error
    pub fn runner(message: impl Into<String>) -> Self {
        Self::Runner {
            message: message.into(),
            runner_id: None,
            context: None,
        }
    }

    /// Create a runner error tied to a specific runner instance
    pub fn runner_with_id(message: impl Into<String>, runner_id: impl Into<String>) -> Self {
        Self::Runner {
            message: message.into(),
            runner_id: Some(runner_id.into()),
            context: None,
        }
    }

    /// Create a new evaluation error
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
            exit_code: None,
            context: None,
        }
    }

    /// Create an evaluation error from a failed external program
    pub fn evaluation_exit(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::Evaluation {
            message: message.into(),
            exit_code,
            context: None,
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            context: None,
        }
    }

    /// Create an IO error for a specific path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            context: None,
        }
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
            context: None,
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            context: None,
        }
    }
}
