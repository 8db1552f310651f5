//! Configuration loading and management

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::model::{Config, ConfigLayer};
use crate::error::{EvalKitError, EvalKitResult};

/// Environment variable overriding `runner.command`
pub const ENV_RUNNER_COMMAND: &str = "EVALKIT_RUNNER_COMMAND";
/// Environment variable overriding `runner.reflection_url`
pub const ENV_RUNNER_URL: &str = "EVALKIT_RUNNER_URL";
/// Environment variable overriding `runner.startup_timeout_secs`
pub const ENV_RUNNER_STARTUP_TIMEOUT: &str = "EVALKIT_RUNNER_STARTUP_TIMEOUT_SECS";
/// Environment variable overriding `eval.program`
pub const ENV_EVAL_PROGRAM: &str = "EVALKIT_EVAL_PROGRAM";

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a file
    File(PathBuf),
    /// Configuration from environment variables
    Environment,
    /// Default configuration
    Default,
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Load configuration from all sources, later sources winning
    pub fn load(self) -> EvalKitResult<Config> {
        let mut config = Config::default();

        for source in &self.sources {
            let source_config = self.load_from_source(source)?;
            config.merge(source_config);
        }

        config.validate()?;
        Ok(config)
    }

    fn load_from_source(&self, source: &ConfigSource) -> EvalKitResult<ConfigLayer> {
        match source {
            ConfigSource::File(path) => {
                tracing::debug!("Loading config from file: {}", path.display());
                load_from_file(path)
            }
            ConfigSource::Environment => {
                tracing::debug!("Loading config from environment");
                load_from_lookup(|key| env::var(key).ok())
            }
            ConfigSource::Default => Ok(Config::default().into()),
        }
    }
}

/// Load configuration for a CLI invocation.
///
/// Layers defaults, the given file (or `~/.evalkit/config.json` when the
/// given file does not exist) and the environment.
pub fn load_config_from_file<P: AsRef<Path>>(config_file: P) -> EvalKitResult<Config> {
    let path = resolve_config_path(config_file.as_ref());
    ConfigLoader::new()
        .with_defaults()
        .with_file(path)
        .with_env()
        .load()
}

/// The file [`load_config_from_file`] reads for `path`.
///
/// `path` itself when it exists, otherwise `~/.evalkit/config.json` when that
/// exists, otherwise `path` unchanged.
pub fn resolve_config_path(path: &Path) -> PathBuf {
    resolve_with_home(path, dirs::home_dir().as_deref())
}

fn resolve_with_home(path: &Path, home: Option<&Path>) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }

    if let Some(home) = home {
        let global_config = home.join(".evalkit").join("config.json");
        if global_config.exists() {
            tracing::debug!(
                "Config file {} not found, using {}",
                path.display(),
                global_config.display()
            );
            return global_config;
        }
    }

    path.to_path_buf()
}

/// Load a layer from a file; a missing file sets nothing
fn load_from_file(path: &Path) -> EvalKitResult<ConfigLayer> {
    if !path.exists() {
        return Ok(ConfigLayer::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        EvalKitError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    parse_config(&content, path)
}

fn parse_config<T: DeserializeOwned>(content: &str, path: &Path) -> EvalKitResult<T> {
    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(content).map_err(|e| {
            EvalKitError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(content).map_err(|e| {
            EvalKitError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(content).map_err(|e| {
            EvalKitError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

/// Serialize a configuration in the format implied by `path`'s extension
pub fn render_config(config: &Config, path: &Path) -> EvalKitResult<String> {
    let rendered = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::to_string_pretty(config)
            .map_err(|e| EvalKitError::config(format!("Failed to render TOML config: {}", e)))?,
        Some("yaml") | Some("yml") => serde_yaml::to_string(config)?,
        _ => serde_json::to_string_pretty(config)?,
    };
    Ok(rendered)
}

/// Build a layer from environment-style key lookups
fn load_from_lookup<F>(lookup: F) -> EvalKitResult<ConfigLayer>
where
    F: Fn(&str) -> Option<String>,
{
    let mut layer = ConfigLayer::default();
    let runner = &mut layer.runner;

    if let Some(command) = lookup(ENV_RUNNER_COMMAND) {
        runner.command = Some(command);
    }

    if let Some(url) = lookup(ENV_RUNNER_URL) {
        runner.reflection_url = Some(url);
    }

    if let Some(timeout) = lookup(ENV_RUNNER_STARTUP_TIMEOUT) {
        runner.startup_timeout_secs = Some(timeout.parse().map_err(|_| {
            EvalKitError::config_with_context(
                format!("Invalid {} value", ENV_RUNNER_STARTUP_TIMEOUT),
                format!("Parsing startup timeout '{}'", timeout),
            )
        })?);
    }

    if let Some(program) = lookup(ENV_EVAL_PROGRAM) {
        layer.eval.program = Some(program);
    }

    Ok(layer)
}
