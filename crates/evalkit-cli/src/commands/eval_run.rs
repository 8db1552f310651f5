//! `eval:run`: evaluate a dataset against the configured evaluators
//!
//! Maps the parsed flags onto [`EvalRunOptions`] and hands them to the
//! evaluation collaborator inside a scoped runner. Errors are not handled
//! here; they propagate to `main`.

use evalkit_core::error::EvalKitResult;
use evalkit_core::eval::{EvalRunOptions, EvalRunUtil};
use evalkit_core::runner::{RunnerLauncher, run_in_runner_then_stop};

use crate::args::EvalRunArgs;

impl EvalRunArgs {
    /// Options for the evaluation call; `--force` turns off interaction
    pub fn to_options(&self) -> EvalRunOptions {
        EvalRunOptions::new(
            self.output.clone(),
            self.evaluators.clone(),
            self.force.then_some(true),
            self.output_format.clone(),
        )
    }
}

/// Run the evaluation and return whatever the collaborator produced
pub async fn execute<L, E>(
    args: EvalRunArgs,
    launcher: &L,
    evaluator: &E,
) -> EvalKitResult<serde_json::Value>
where
    L: RunnerLauncher + ?Sized,
    E: EvalRunUtil + ?Sized,
{
    let options = args.to_options();
    let dataset = args.dataset;
    tracing::debug!(%dataset, ?options, "eval:run");

    run_in_runner_then_stop(launcher, |runner| async move {
        evaluator.eval_run(runner, &dataset, options).await
    })
    .await
}
