//! Evaluation through an external program
//!
//! The program is invoked as `program [args...] <dataset>`. Options and
//! runner details travel in environment variables. stdin and stderr are
//! inherited so the program can prompt the user; stdout carries the result.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use super::{EvalRunOptions, EvalRunUtil};
use crate::config::EvalToolConfig;
use crate::error::{EvalKitError, EvalKitResult};
use crate::runner::Runner;

/// Options JSON, camelCase keys
pub const ENV_EVAL_OPTIONS: &str = "EVALKIT_EVAL_OPTIONS";
/// Id of the runner session
pub const ENV_RUNNER_ID: &str = "EVALKIT_RUNNER_ID";
/// Reflection API base URL, when known
pub const ENV_RUNNER_URL: &str = "EVALKIT_RUNNER_URL";
/// Runtime process id, when the runner owns the process
pub const ENV_RUNNER_PID: &str = "EVALKIT_RUNNER_PID";

/// [`EvalRunUtil`] backed by an external evaluation program
#[derive(Debug, Clone)]
pub struct CommandEvalRun {
    config: EvalToolConfig,
}

impl CommandEvalRun {
    /// Create a delegate for the configured program
    pub fn new(config: EvalToolConfig) -> Self {
        Self { config }
    }

    fn build_command(
        &self,
        runner: &dyn Runner,
        dataset: &str,
        options: &EvalRunOptions,
    ) -> EvalKitResult<Command> {
        let options_json = serde_json::to_string(options)?;

        let mut cmd = Command::new(self.config.effective_program());
        cmd.args(&self.config.args)
            .arg(dataset)
            .env(ENV_EVAL_OPTIONS, options_json)
            .env(ENV_RUNNER_ID, runner.id())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if let Some(url) = runner.reflection_url() {
            cmd.env(ENV_RUNNER_URL, url);
        }
        if let Some(pid) = runner.pid() {
            cmd.env(ENV_RUNNER_PID, pid.to_string());
        }

        Ok(cmd)
    }
}

/// Interpret captured stdout as the evaluation value
fn parse_stdout(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(trimmed)
        .unwrap_or_else(|_| serde_json::Value::String(trimmed.to_string()))
}

#[async_trait]
impl EvalRunUtil for CommandEvalRun {
    async fn eval_run(
        &self,
        runner: Arc<dyn Runner>,
        dataset: &str,
        options: EvalRunOptions,
    ) -> EvalKitResult<serde_json::Value> {
        let program = self.config.effective_program();
        tracing::debug!(
            program,
            dataset,
            runner_id = runner.id(),
            interactive = options.interactive,
            "Running evaluation program"
        );

        // spawn + wait_with_output keeps stderr inherited; `output()` would pipe it
        let child = self
            .build_command(runner.as_ref(), dataset, &options)?
            .spawn()
            .map_err(|e| {
                EvalKitError::evaluation(format!(
                    "Failed to run evaluation program '{}': {}",
                    program, e
                ))
            })?;
        let output = child.wait_with_output().await.map_err(|e| {
            EvalKitError::evaluation(format!(
                "Failed to wait for evaluation program '{}': {}",
                program, e
            ))
        })?;

        if !output.status.success() {
            return Err(EvalKitError::evaluation_exit(
                format!(
                    "Evaluation program '{}' failed for dataset '{}': {}",
                    program, dataset, output.status
                ),
                output.status.code(),
            ));
        }

        Ok(parse_stdout(&output.stdout))
    }
}
