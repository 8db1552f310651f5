//! Configuration management commands

use std::path::Path;

use dialoguer::{Confirm, theme::ColorfulTheme};
use evalkit_core::config::{Config, load_config_from_file, render_config, resolve_config_path};
use evalkit_core::error::{EvalKitError, EvalKitResult};

use crate::console::CliConsole;

/// Show the effective configuration (defaults, file and environment merged)
pub async fn show(config_file: &str, verbose: bool) -> EvalKitResult<()> {
    let console = CliConsole::new(verbose);
    console.print_header("Configuration");

    let resolved = resolve_config_path(Path::new(config_file));
    console.info(&source_description(config_file, &resolved));

    let config = load_config_from_file(config_file)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn source_description(requested: &str, resolved: &Path) -> String {
    if !resolved.exists() {
        format!("Configuration file not found: {requested}, using defaults and environment")
    } else if resolved == Path::new(requested) {
        format!("Loaded configuration from: {requested}")
    } else {
        format!(
            "Configuration file not found: {requested}, loaded {} instead",
            resolved.display()
        )
    }
}

/// Write a default configuration file
pub async fn init(config_file: &str, force: bool) -> EvalKitResult<()> {
    let console = CliConsole::new(true);
    let path = Path::new(config_file);

    if path.exists() && !force {
        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{config_file} already exists. Overwrite?"))
            .default(false)
            .interact()
            .map_err(|e| EvalKitError::io(format!("Failed to read confirmation: {e}")))?;

        if !overwrite {
            console.warn("Keeping existing configuration file");
            return Ok(());
        }
    }

    write_default_config(path)?;
    console.success(&format!("Created configuration file: {config_file}"));
    Ok(())
}

fn write_default_config(path: &Path) -> EvalKitResult<()> {
    let rendered = render_config(&Config::default(), path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            EvalKitError::io_with_path(format!("Failed to create directory: {e}"), parent)
        })?;
    }

    std::fs::write(path, rendered).map_err(|e| {
        EvalKitError::io_with_path(format!("Failed to write configuration: {e}"), path)
    })
}
