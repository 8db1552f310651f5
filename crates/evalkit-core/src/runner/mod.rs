//! Runner lifecycle
//!
//! A runner is the managed session hosting the evaluators. This module
//! provides the runner traits, the scoped helper that guarantees a runner is
//! stopped, and a process-backed implementation.

mod process;
mod scoped;
mod types;

pub use process::{HEALTH_PATH, ProcessRunner, ProcessRunnerLauncher};
pub use scoped::run_in_runner_then_stop;
pub use types::{Runner, RunnerLauncher};
