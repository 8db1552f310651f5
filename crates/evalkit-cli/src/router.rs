//! Command routing logic for CLI

use evalkit_core::config::load_config_from_file;
use evalkit_core::error::EvalKitResult;
use evalkit_core::eval::CommandEvalRun;
use evalkit_core::runner::ProcessRunnerLauncher;

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> EvalKitResult<()> {
    match cli.command {
        Commands::EvalRun(args) => {
            let config = load_config_from_file(&cli.config_file)?;
            let launcher = ProcessRunnerLauncher::new(config.runner);
            let evaluator = CommandEvalRun::new(config.eval);

            let value = commands::eval_run::execute(args, &launcher, &evaluator).await?;
            tracing::debug!(result = %value, "eval:run finished");
            Ok(())
        }
        Commands::Config { action } => route_config(action, &cli.config_file, cli.verbose).await,
    }
}

async fn route_config(action: ConfigAction, config_file: &str, verbose: bool) -> EvalKitResult<()> {
    match action {
        ConfigAction::Show => commands::config::show(config_file, verbose).await,
        ConfigAction::Init { force } => commands::config::init(config_file, force).await,
    }
}
