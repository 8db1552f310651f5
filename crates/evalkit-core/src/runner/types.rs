//! Runner traits

use async_trait::async_trait;

use crate::error::EvalKitResult;

/// A started runner session
#[async_trait]
pub trait Runner: Send + Sync {
    /// Unique identifier of this session
    fn id(&self) -> &str;

    /// Base URL of the runtime's reflection API, if known
    fn reflection_url(&self) -> Option<&str>;

    /// Process id of the hosted runtime, if this session owns one
    fn pid(&self) -> Option<u32> {
        None
    }

    /// Stop the session. Calling it again after a successful stop is a no-op.
    async fn stop(&self) -> EvalKitResult<()>;
}

/// Starts runner sessions
#[async_trait]
pub trait RunnerLauncher: Send + Sync {
    /// Acquire a started runner
    async fn start(&self) -> EvalKitResult<Box<dyn Runner>>;
}
