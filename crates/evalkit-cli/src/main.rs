//! Evalkit CLI application
//!
//! ```bash
//! evalkit eval:run dataset.json --evaluators faithfulness,relevancy --output results.csv --output-format csv
//! ```
//!
//! The runtime hosting the evaluators and the evaluation program itself are
//! configured in `evalkit.json` (see `evalkit config init`).

mod args;
mod commands;
mod console;
mod router;

use clap::Parser;
use evalkit_core::error::EvalKitResult;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, LogFormat};

#[tokio::main]
async fn main() -> EvalKitResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let result = router::route(cli).await;
    if let Err(e) = &result {
        tracing::error!(code = e.error_code(), context = ?e.context(), "{}", e.message());
    }
    result
}

/// Initialize logging on stderr.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug output.
fn init_logging(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
