//! Process-backed runner
//!
//! Starts the configured runtime command as a child process and, when a
//! reflection URL is configured, waits for it to report healthy. Without a
//! command the runner attaches to a runtime managed elsewhere.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep, timeout};
use uuid::Uuid;

use super::{Runner, RunnerLauncher};
use crate::config::RunnerConfig;
use crate::error::{EvalKitError, EvalKitResult};

/// Health endpoint of the runtime's reflection API
pub const HEALTH_PATH: &str = "/api/__health";

const HEALTH_POLL_INTERVAL: Duration = Duration::from_millis(250);
const HEALTH_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// A runner session, optionally owning the runtime process
pub struct ProcessRunner {
    id: String,
    reflection_url: Option<String>,
    pid: Option<u32>,
    child: Mutex<Option<Child>>,
    stop_timeout: Duration,
    started_at: DateTime<Utc>,
}

impl ProcessRunner {
    /// A runner attached to a runtime it does not own
    fn attached(id: String, reflection_url: Option<String>, stop_timeout: Duration) -> Self {
        Self {
            id,
            reflection_url,
            pid: None,
            child: Mutex::new(None),
            stop_timeout,
            started_at: Utc::now(),
        }
    }
}

#[async_trait]
impl Runner for ProcessRunner {
    fn id(&self) -> &str {
        &self.id
    }

    fn reflection_url(&self) -> Option<&str> {
        self.reflection_url.as_deref()
    }

    fn pid(&self) -> Option<u32> {
        self.pid
    }

    async fn stop(&self) -> EvalKitResult<()> {
        let Some(mut child) = self.child.lock().await.take() else {
            return Ok(());
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!(runner_id = %self.id, %status, "Runner process already exited");
                return Ok(());
            }
            Ok(None) => {}
            Err(e) => {
                return Err(EvalKitError::runner_with_id(
                    format!("Failed to query runner process: {}", e),
                    &self.id,
                ));
            }
        }

        child.start_kill().map_err(|e| {
            EvalKitError::runner_with_id(format!("Failed to kill runner process: {}", e), &self.id)
        })?;

        match timeout(self.stop_timeout, child.wait()).await {
            Ok(Ok(status)) => {
                let uptime = Utc::now() - self.started_at;
                tracing::info!(
                    runner_id = %self.id,
                    pid = ?self.pid,
                    %status,
                    uptime_ms = uptime.num_milliseconds(),
                    "Runner process stopped"
                );
                Ok(())
            }
            Ok(Err(e)) => Err(EvalKitError::runner_with_id(
                format!("Failed to wait for runner process: {}", e),
                &self.id,
            )),
            Err(_) => Err(EvalKitError::runner_with_id(
                format!(
                    "Runner process did not exit within {}s",
                    self.stop_timeout.as_secs()
                ),
                &self.id,
            )),
        }
    }
}

/// Launches [`ProcessRunner`] sessions from a [`RunnerConfig`]
pub struct ProcessRunnerLauncher {
    config: RunnerConfig,
    client: reqwest::Client,
}

impl ProcessRunnerLauncher {
    /// Create a launcher for the given configuration
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn reflection_url(&self) -> Option<String> {
        self.config
            .reflection_url
            .as_ref()
            .map(|url| url.trim_end_matches('/').to_string())
    }

    fn spawn(&self, command: &str, runner_id: &str) -> EvalKitResult<Child> {
        let mut cmd = Command::new(command);
        cmd.args(&self.config.args)
            .envs(&self.config.env)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        cmd.spawn().map_err(|e| {
            EvalKitError::runner_with_id(
                format!("Failed to start runner command '{}': {}", command, e),
                runner_id,
            )
        })
    }

    /// Poll the health endpoint until it answers with success.
    ///
    /// Fails early when the owned child exits before becoming healthy.
    async fn wait_until_healthy(
        &self,
        url: &str,
        runner_id: &str,
        mut child: Option<&mut Child>,
    ) -> EvalKitResult<()> {
        let health_url = format!("{}{}", url, HEALTH_PATH);
        let deadline = Instant::now() + Duration::from_secs(self.config.startup_timeout_secs);

        loop {
            if let Some(child) = child.as_deref_mut() {
                if let Ok(Some(status)) = child.try_wait() {
                    return Err(EvalKitError::runner_with_id(
                        format!("Runner process exited before becoming ready: {}", status),
                        runner_id,
                    ));
                }
            }

            match self
                .client
                .get(&health_url)
                .timeout(HEALTH_REQUEST_TIMEOUT)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(runner_id, url = %health_url, "Runner is healthy");
                    return Ok(());
                }
                Ok(response) => {
                    tracing::trace!(runner_id, status = %response.status(), "Runner not ready yet");
                }
                Err(e) => {
                    tracing::trace!(runner_id, error = %e, "Runner not reachable yet");
                }
            }

            if Instant::now() >= deadline {
                return Err(EvalKitError::runner_with_id(
                    format!(
                        "Runner at {} did not become ready within {}s",
                        url, self.config.startup_timeout_secs
                    ),
                    runner_id,
                ));
            }

            sleep(HEALTH_POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl RunnerLauncher for ProcessRunnerLauncher {
    async fn start(&self) -> EvalKitResult<Box<dyn Runner>> {
        let id = Uuid::new_v4().to_string();
        let reflection_url = self.reflection_url();
        let stop_timeout = Duration::from_secs(self.config.stop_timeout_secs);

        let Some(command) = self.config.command.as_deref() else {
            tracing::info!(runner_id = %id, url = ?reflection_url, "Attaching to running runtime");
            if let Some(url) = &reflection_url {
                self.wait_until_healthy(url, &id, None).await?;
            }
            return Ok(Box::new(ProcessRunner::attached(
                id,
                reflection_url,
                stop_timeout,
            )));
        };

        let mut child = self.spawn(command, &id)?;
        let pid = child.id();
        tracing::info!(runner_id = %id, pid = ?pid, command, "Started runner process");

        if let Some(url) = &reflection_url {
            if let Err(e) = self.wait_until_healthy(url, &id, Some(&mut child)).await {
                if child.start_kill().is_ok() {
                    let _ = timeout(stop_timeout, child.wait()).await;
                }
                return Err(e);
            }
        }

        Ok(Box::new(ProcessRunner {
            id,
            reflection_url,
            pid,
            child: Mutex::new(Some(child)),
            stop_timeout,
            started_at: Utc::now(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_attached_runner_without_url() {
        let launcher = ProcessRunnerLauncher::new(RunnerConfig::default());
        let runner = launcher.start().await.unwrap();

        assert!(runner.pid().is_none());
        assert!(runner.reflection_url().is_none());
        assert!(!runner.id().is_empty());
        runner.stop().await.unwrap();
        runner.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_command_fails_to_start() {
        let config = RunnerConfig {
            command: Some("evalkit-definitely-not-a-command".to_string()),
            ..Default::default()
        };
        let launcher = ProcessRunnerLauncher::new(config);
        let err = launcher.start().await.err().unwrap();

        assert!(matches!(err, EvalKitError::Runner { .. }));
        assert!(err.message().contains("evalkit-definitely-not-a-command"));
    }

    #[tokio::test]
    async fn test_unreachable_url_times_out() {
        let config = RunnerConfig {
            reflection_url: Some("http://127.0.0.1:9/".to_string()),
            startup_timeout_secs: 1,
            ..Default::default()
        };
        let launcher = ProcessRunnerLauncher::new(config);
        let err = launcher.start().await.err().unwrap();

        assert!(err.message().contains("did not become ready"));
    }
}
