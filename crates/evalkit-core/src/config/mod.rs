//! Configuration model and loading

pub mod loader;
pub mod model;

pub use loader::{
    ConfigLoader, ConfigSource, load_config_from_file, render_config, resolve_config_path,
};
pub use model::{
    Config, ConfigLayer, DEFAULT_EVAL_PROGRAM, EvalToolConfig, EvalToolLayer, RunnerConfig,
    RunnerLayer,
};
