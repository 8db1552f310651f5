//! CLI argument definitions using clap
//!
//! - evalkit eval:run <dataset> [--output <filename>] [--output-format <format>]
//!   [--evaluators <evaluators>] [--force]
//! - evalkit config show|init

use clap::{Args, Parser, Subcommand, ValueEnum};
use evalkit_core::eval::DEFAULT_OUTPUT_FORMAT;

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "evalkit.json";

#[derive(Parser, Debug)]
#[command(name = "evalkit")]
#[command(about = "Evaluate datasets against configured evaluators")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Enable verbose (debug) logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// evaluate provided dataset against configured evaluators
    #[command(name = "eval:run")]
    EvalRun(EvalRunArgs),

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `eval:run`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EvalRunArgs {
    /// Dataset to evaluate on (currently only supports JSON)
    pub dataset: String,

    /// name of the output file to write evaluation results. Defaults to json output.
    #[arg(long, value_name = "filename")]
    pub output: Option<String>,

    /// The output file format (csv, json)
    #[arg(long, value_name = "format", default_value = DEFAULT_OUTPUT_FORMAT)]
    pub output_format: String,

    /// comma separated list of evaluators to use (by default uses all)
    #[arg(long, value_name = "evaluators")]
    pub evaluators: Option<String>,

    /// Automatically accept all interactive prompts
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file without prompting
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
