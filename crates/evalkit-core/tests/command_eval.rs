//! Integration tests for the external evaluation program delegate

#![cfg(unix)]

use std::sync::Arc;

use async_trait::async_trait;
use evalkit_core::EvalKitResult;
use evalkit_core::eval::{CommandEvalRun, EvalRunOptions, EvalRunUtil};
use evalkit_core::runner::{ProcessRunnerLauncher, Runner, RunnerLauncher};
use evalkit_core::{EvalToolConfig, RunnerConfig};

/// A delegate running an inline `sh` script; the dataset arrives as `$1`
fn script_delegate(script: &str) -> CommandEvalRun {
    CommandEvalRun::new(EvalToolConfig {
        program: Some("sh".to_string()),
        args: vec![
            "-c".to_string(),
            script.to_string(),
            "evalkit-eval".to_string(),
        ],
    })
}

/// A runner that reports a URL and an owned process without running one
struct FixedRunner;

#[async_trait]
impl Runner for FixedRunner {
    fn id(&self) -> &str {
        "fixed-runner"
    }

    fn reflection_url(&self) -> Option<&str> {
        Some("http://127.0.0.1:3100")
    }

    fn pid(&self) -> Option<u32> {
        Some(4242)
    }

    async fn stop(&self) -> EvalKitResult<()> {
        Ok(())
    }
}

async fn attached_runner() -> Arc<dyn Runner> {
    let launcher = ProcessRunnerLauncher::new(RunnerConfig::default());
    Arc::from(launcher.start().await.unwrap())
}

#[tokio::test]
async fn test_forwards_dataset_options_and_runner() {
    let delegate = script_delegate(
        r#"printf '{"dataset":"%s","options":%s,"runner":"%s"}' "$1" "$EVALKIT_EVAL_OPTIONS" "$EVALKIT_RUNNER_ID""#,
    );
    let runner = attached_runner().await;
    let runner_id = runner.id().to_string();

    let options = EvalRunOptions::new(
        Some("out.json".to_string()),
        Some("a,b".to_string()),
        None,
        "json",
    );
    let value = delegate
        .eval_run(runner, "mydata.json", options)
        .await
        .unwrap();

    assert_eq!(value["dataset"], "mydata.json");
    assert_eq!(value["runner"], runner_id.as_str());
    assert_eq!(
        value["options"],
        serde_json::json!({
            "output": "out.json",
            "evaluators": "a,b",
            "outputFormat": "json",
            "interactive": true
        })
    );
}

#[tokio::test]
async fn test_runner_url_and_pid_exported_when_known() {
    let delegate = script_delegate(
        r#"printf '{"url":"%s","pid":"%s","id":"%s"}' "$EVALKIT_RUNNER_URL" "$EVALKIT_RUNNER_PID" "$EVALKIT_RUNNER_ID""#,
    );

    let value = delegate
        .eval_run(Arc::new(FixedRunner), "data.json", EvalRunOptions::default())
        .await
        .unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "url": "http://127.0.0.1:3100",
            "pid": "4242",
            "id": "fixed-runner"
        })
    );
}

#[tokio::test]
async fn test_runner_url_and_pid_absent_for_attached_runner() {
    let delegate = script_delegate(
        r#"printf '["%s","%s"]' "${EVALKIT_RUNNER_URL:-none}" "${EVALKIT_RUNNER_PID:-none}""#,
    );
    let runner = attached_runner().await;

    let value = delegate
        .eval_run(runner, "data.json", EvalRunOptions::default())
        .await
        .unwrap();
    assert_eq!(value, serde_json::json!(["none", "none"]));
}

#[tokio::test]
async fn test_non_zero_exit_carries_code() {
    let delegate = script_delegate("exit 7");
    let runner = attached_runner().await;

    let err = delegate
        .eval_run(runner, "data.json", EvalRunOptions::default())
        .await
        .unwrap_err();

    match err {
        evalkit_core::EvalKitError::Evaluation { exit_code, message, .. } => {
            assert_eq!(exit_code, Some(7));
            assert!(message.contains("data.json"));
        }
        other => panic!("Expected evaluation error, got {:?}", other),
    }
}
