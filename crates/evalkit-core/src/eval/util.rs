//! Evaluation collaborator trait

use std::sync::Arc;

use async_trait::async_trait;

use super::EvalRunOptions;
use crate::error::EvalKitResult;
use crate::runner::Runner;

/// Runs an evaluation of a dataset inside a started runner.
///
/// Implementations own dataset parsing, evaluator selection, execution and
/// result output. The returned value is opaque to callers.
#[async_trait]
pub trait EvalRunUtil: Send + Sync {
    async fn eval_run(
        &self,
        runner: Arc<dyn Runner>,
        dataset: &str,
        options: EvalRunOptions,
    ) -> EvalKitResult<serde_json::Value>;
}
