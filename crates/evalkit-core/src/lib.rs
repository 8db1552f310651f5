//! Evalkit core library
//!
//! Shared building blocks behind the `evalkit` command line:
//!
//! - **Errors**: a single [`EvalKitError`] type used across crates
//! - **Configuration**: layered loading from defaults, files and environment
//! - **Runner**: the managed session that hosts evaluators, with scoped
//!   acquisition that always stops the runner
//! - **Eval**: the options handed to the evaluation collaborator and the
//!   collaborator trait itself
//!
//! # Example
//!
//! ```rust,ignore
//! use evalkit_core::eval::{CommandEvalRun, EvalRunOptions, EvalRunUtil};
//! use evalkit_core::runner::{run_in_runner_then_stop, ProcessRunnerLauncher};
//!
//! let launcher = ProcessRunnerLauncher::new(config.runner.clone());
//! let evaluator = CommandEvalRun::new(config.eval.clone());
//! let value = run_in_runner_then_stop(&launcher, |runner| async move {
//!     evaluator.eval_run(runner, "dataset.json", options).await
//! })
//! .await?;
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod runner;

// Re-exports for convenience
pub use config::{Config, ConfigLoader, EvalToolConfig, RunnerConfig};
pub use error::{EvalKitError, EvalKitResult};
pub use eval::{CommandEvalRun, EvalRunOptions, EvalRunUtil};
pub use runner::{ProcessRunnerLauncher, Runner, RunnerLauncher, run_in_runner_then_stop};
