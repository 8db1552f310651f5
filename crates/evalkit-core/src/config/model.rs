//! Configuration data structures

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{EvalKitError, EvalKitResult};

/// Program run by [`crate::eval::CommandEvalRun`] when none is configured
pub const DEFAULT_EVAL_PROGRAM: &str = "evalkit-eval";

/// Top-level evalkit configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How the runner session is started and stopped
    #[serde(default)]
    pub runner: RunnerConfig,

    /// The external evaluation program
    #[serde(default)]
    pub eval: EvalToolConfig,
}

/// Runner session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Command that starts the runtime hosting the evaluators.
    /// When absent the runner attaches to an already running runtime.
    #[serde(default)]
    pub command: Option<String>,

    /// Arguments passed to `command`
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory for `command`
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Extra environment for `command`
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Base URL of the runtime's reflection API
    #[serde(default)]
    pub reflection_url: Option<String>,

    /// Seconds to wait for the runtime to report healthy
    #[serde(default = "default_startup_timeout")]
    pub startup_timeout_secs: u64,

    /// Seconds to wait for the runtime to exit once killed
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout_secs: u64,
}

fn default_startup_timeout() -> u64 {
    30
}

fn default_stop_timeout() -> u64 {
    10
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            working_dir: None,
            env: HashMap::new(),
            reflection_url: None,
            startup_timeout_secs: default_startup_timeout(),
            stop_timeout_secs: default_stop_timeout(),
        }
    }
}

/// External evaluation program configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalToolConfig {
    /// Program to execute; defaults to [`DEFAULT_EVAL_PROGRAM`]
    #[serde(default)]
    pub program: Option<String>,

    /// Arguments placed before the dataset argument
    #[serde(default)]
    pub args: Vec<String>,
}

impl EvalToolConfig {
    /// The program that will actually be executed
    pub fn effective_program(&self) -> &str {
        self.program.as_deref().unwrap_or(DEFAULT_EVAL_PROGRAM)
    }
}

/// One layer of configuration from a file or the environment.
///
/// Only fields present in the source are `Some`, so a layer can set a
/// value back to its default or clear a list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub runner: RunnerLayer,

    #[serde(default)]
    pub eval: EvalToolLayer,
}

/// Runner fields of a [`ConfigLayer`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunnerLayer {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub working_dir: Option<PathBuf>,
    pub env: Option<HashMap<String, String>>,
    pub reflection_url: Option<String>,
    pub startup_timeout_secs: Option<u64>,
    pub stop_timeout_secs: Option<u64>,
}

/// Evaluation program fields of a [`ConfigLayer`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EvalToolLayer {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

impl From<Config> for ConfigLayer {
    fn from(config: Config) -> Self {
        let Config { runner, eval } = config;
        Self {
            runner: RunnerLayer {
                command: runner.command,
                args: Some(runner.args),
                working_dir: runner.working_dir,
                env: Some(runner.env),
                reflection_url: runner.reflection_url,
                startup_timeout_secs: Some(runner.startup_timeout_secs),
                stop_timeout_secs: Some(runner.stop_timeout_secs),
            },
            eval: EvalToolLayer {
                program: eval.program,
                args: Some(eval.args),
            },
        }
    }
}

impl Config {
    /// Apply a layer on top of this configuration.
    ///
    /// Every field the layer sets wins. `runner.env` entries are merged by key.
    pub fn merge(&mut self, layer: ConfigLayer) {
        let runner = layer.runner;
        if runner.command.is_some() {
            self.runner.command = runner.command;
        }
        if let Some(args) = runner.args {
            self.runner.args = args;
        }
        if runner.working_dir.is_some() {
            self.runner.working_dir = runner.working_dir;
        }
        if let Some(env) = runner.env {
            self.runner.env.extend(env);
        }
        if runner.reflection_url.is_some() {
            self.runner.reflection_url = runner.reflection_url;
        }
        if let Some(secs) = runner.startup_timeout_secs {
            self.runner.startup_timeout_secs = secs;
        }
        if let Some(secs) = runner.stop_timeout_secs {
            self.runner.stop_timeout_secs = secs;
        }

        let eval = layer.eval;
        if eval.program.is_some() {
            self.eval.program = eval.program;
        }
        if let Some(args) = eval.args {
            self.eval.args = args;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> EvalKitResult<()> {
        if self.runner.startup_timeout_secs == 0 {
            return Err(EvalKitError::config(
                "runner.startup_timeout_secs must be greater than 0",
            ));
        }
        if self.runner.stop_timeout_secs == 0 {
            return Err(EvalKitError::config(
                "runner.stop_timeout_secs must be greater than 0",
            ));
        }
        if let Some(url) = &self.runner.reflection_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(EvalKitError::config_with_context(
                    format!("Invalid reflection URL: {}", url),
                    "runner.reflection_url must start with http:// or https://",
                ));
            }
        }
        if let Some(command) = &self.runner.command {
            if command.trim().is_empty() {
                return Err(EvalKitError::config("runner.command must not be empty"));
            }
        }
        if let Some(program) = &self.eval.program {
            if program.trim().is_empty() {
                return Err(EvalKitError::config("eval.program must not be empty"));
            }
        }
        Ok(())
    }
}
