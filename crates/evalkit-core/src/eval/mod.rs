//! Evaluation delegation
//!
//! The evaluation engine is external. This module defines the options handed
//! to it, the collaborator trait, and an implementation that runs an external
//! evaluation program.

mod command;
mod options;
mod util;

pub use command::{
    CommandEvalRun, ENV_EVAL_OPTIONS, ENV_RUNNER_ID, ENV_RUNNER_PID, ENV_RUNNER_URL,
};
pub use options::{DEFAULT_OUTPUT_FORMAT, EvalRunOptions};
pub use util::EvalRunUtil;
