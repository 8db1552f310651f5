//! Scoped runner acquisition

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::{Runner, RunnerLauncher};
use crate::error::EvalKitResult;

/// Start a runner, run `f` with it, then stop the runner.
///
/// The runner is stopped on every exit path: when `f` succeeds, when it
/// returns an error and when it panics. The outcome of `f` takes precedence
/// over a failure to stop; a stop failure is only returned when `f`
/// succeeded. A panic in `f` resumes unwinding after the runner is stopped.
pub async fn run_in_runner_then_stop<L, F, Fut, T>(launcher: &L, f: F) -> EvalKitResult<T>
where
    L: RunnerLauncher + ?Sized,
    F: FnOnce(Arc<dyn Runner>) -> Fut,
    Fut: Future<Output = EvalKitResult<T>>,
{
    let runner: Arc<dyn Runner> = Arc::from(launcher.start().await?);
    tracing::debug!(runner_id = runner.id(), pid = ?runner.pid(), "Runner started");

    let scoped = Arc::clone(&runner);
    let outcome = AssertUnwindSafe(async move { f(scoped).await })
        .catch_unwind()
        .await;

    let stopped = runner.stop().await;
    match &stopped {
        Ok(()) => tracing::debug!(runner_id = runner.id(), "Runner stopped"),
        Err(e) => tracing::warn!(runner_id = runner.id(), error = %e, "Failed to stop runner"),
    }

    match outcome {
        Ok(Ok(value)) => stopped.map(|()| value),
        Ok(Err(err)) => Err(err),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
