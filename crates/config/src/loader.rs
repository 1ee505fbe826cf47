//! Configuration loading utilities

use crate::settings::{ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File, FileFormat};
use thiserror::Error;

/// Prefix of environment overrides, e.g. `LENDPOOL_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "LENDPOOL";

const DEFAULT_CONFIG_PATH: &str = "config/config";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Source(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load `config/config.{toml,json,yaml}` (optional) with environment overrides
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	load_config_from(DEFAULT_CONFIG_PATH)
}

/// Load settings from an optional config file at `path` plus the environment
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	build_settings(
		Config::builder().add_source(File::with_name(path).required(false)),
		environment(),
	)
}

fn environment() -> Environment {
	Environment::with_prefix(ENV_PREFIX)
		.prefix_separator("_")
		.separator("__")
		.try_parsing(true)
}

fn build_settings(
	builder: config::ConfigBuilder<config::builder::DefaultState>,
	environment: Environment,
) -> Result<Settings, ConfigLoadError> {
	let settings: Settings = builder.add_source(environment).build()?.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}

/// Parse settings from an in-memory TOML document
pub fn load_config_from_toml(document: &str) -> Result<Settings, ConfigLoadError> {
	build_settings(
		Config::builder().add_source(File::from_str(document, FileFormat::Toml)),
		environment(),
	)
}
