//! End-to-end tests for the evalkit binary
//!
//! These run the compiled binary with a throwaway configuration whose
//! runner and evaluation program are small shell commands.

#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output};

fn evalkit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_evalkit"))
        .args(args)
        .current_dir(dir)
        .env_remove("EVALKIT_RUNNER_COMMAND")
        .env_remove("EVALKIT_RUNNER_URL")
        .env_remove("EVALKIT_RUNNER_STARTUP_TIMEOUT_SECS")
        .env_remove("EVALKIT_EVAL_PROGRAM")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run evalkit")
}

fn write_config(dir: &Path, script: &str) {
    let config = serde_json::json!({
        "runner": { "command": "sleep", "args": ["30"] },
        "eval": { "program": "sh", "args": ["-c", script, "evalkit-eval"] }
    });
    std::fs::write(
        dir.join("evalkit.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_missing_dataset_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = evalkit(dir.path(), &["eval:run"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<DATASET>"), "stderr: {stderr}");
}

#[test]
fn test_eval_run_hands_options_to_program() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        r#"printf '{"dataset":"%s","options":%s}' "$1" "$EVALKIT_EVAL_OPTIONS" > captured.json"#,
    );

    let output = evalkit(
        dir.path(),
        &[
            "eval:run",
            "mydata.json",
            "--evaluators",
            "a,b",
            "--output",
            "out.json",
            "--force",
        ],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());

    let captured: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("captured.json")).unwrap())
            .unwrap();
    assert_eq!(
        captured,
        serde_json::json!({
            "dataset": "mydata.json",
            "options": {
                "output": "out.json",
                "evaluators": "a,b",
                "force": true,
                "outputFormat": "json",
                "interactive": false
            }
        })
    );
}

#[test]
fn test_failed_evaluation_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "echo 'dataset not found' >&2; exit 5");

    let output = evalkit(dir.path(), &["eval:run", "absent.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dataset not found"), "stderr: {stderr}");
    assert!(stderr.contains("Evaluation"), "stderr: {stderr}");
    assert!(stderr.contains("EVALKIT_EVALUATION"), "stderr: {stderr}");
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();

    let init = evalkit(dir.path(), &["config", "init"]);
    assert!(init.status.success());
    assert!(dir.path().join("evalkit.json").exists());

    let show = evalkit(dir.path(), &["config", "show"]);
    assert!(show.status.success());
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("startup_timeout_secs"), "stdout: {stdout}");
}
