//! Configuration settings structures

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use lendpool_types::{AdapterRuntimeConfig, ProtocolName, DEFAULT_ADAPTER_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use thiserror::Error;

/// Header an `api_key` is sent in unless a protocol overrides it
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub timeouts: TimeoutSettings,
	/// Keyed by protocol name; matched case-insensitively
	pub protocols: BTreeMap<String, ProtocolSettings>,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Upper bound on one adapter call unless the protocol sets its own
	pub per_adapter_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			per_adapter_ms: DEFAULT_ADAPTER_TIMEOUT_MS,
		}
	}
}

/// Upstream settings for one lending protocol
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProtocolSettings {
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	pub endpoint: Option<String>,
	pub timeout_ms: Option<u64>,
	pub headers: Option<HashMap<String, String>>,
	pub api_key: Option<ConfigurableValue>,
	#[serde(default = "default_api_key_header")]
	pub api_key_header: String,
}

fn default_enabled() -> bool {
	true
}

fn default_api_key_header() -> String {
	DEFAULT_API_KEY_HEADER.to_string()
}

impl ProtocolSettings {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			enabled: true,
			endpoint: Some(endpoint.into()),
			timeout_ms: None,
			headers: None,
			api_key: None,
			api_key_header: default_api_key_header(),
		}
	}

	/// Static headers plus the resolved API key header, if any
	pub fn resolve_headers(&self) -> Result<HashMap<String, String>, ConfigurableValueError> {
		let mut headers = self.headers.clone().unwrap_or_default();
		if let Some(api_key) = &self.api_key {
			let secret = api_key.resolve_for_secret()?;
			headers.insert(self.api_key_header.clone(), secret.expose_secret().to_string());
		}
		Ok(headers)
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EnvironmentSettings {
	pub rate_limiting: RateLimitSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
}

impl Default for RateLimitSettings {
	fn default() -> Self {
		Self {
			enabled: false,
			requests_per_minute: 600,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
	#[error("Timeout for {scope} must be greater than zero")]
	ZeroTimeout { scope: String },

	#[error("Unknown protocol '{0}' in protocols section")]
	UnknownProtocol(String),

	#[error("Protocol '{0}' is listed more than once")]
	DuplicateProtocol(ProtocolName),

	#[error("Protocol {0} is enabled but has no endpoint")]
	MissingEndpoint(ProtocolName),

	#[error("Rate limiting is enabled with zero requests per minute")]
	InvalidRateLimit,
}

impl Settings {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Enabled protocols in canonical protocol order
	///
	/// This order becomes the registration order and so the response key order.
	pub fn enabled_protocols(
		&self,
	) -> Result<Vec<(ProtocolName, &ProtocolSettings)>, ConfigValidationError> {
		let mut resolved: Vec<(ProtocolName, &ProtocolSettings)> = Vec::new();
		for (key, protocol_settings) in &self.protocols {
			let protocol = ProtocolName::from_str(key)
				.map_err(|_| ConfigValidationError::UnknownProtocol(key.clone()))?;
			if resolved.iter().any(|(existing, _)| *existing == protocol) {
				return Err(ConfigValidationError::DuplicateProtocol(protocol));
			}
			resolved.push((protocol, protocol_settings));
		}

		resolved.retain(|(_, protocol_settings)| protocol_settings.enabled);
		resolved.sort_by_key(|(protocol, _)| {
			ProtocolName::ALL
				.iter()
				.position(|candidate| candidate == protocol)
		});
		Ok(resolved)
	}

	pub fn effective_timeout_ms(&self, protocol_settings: &ProtocolSettings) -> u64 {
		protocol_settings
			.timeout_ms
			.unwrap_or(self.timeouts.per_adapter_ms)
	}

	/// Runtime config handed to the adapter for `protocol`
	pub fn runtime_config(
		&self,
		protocol: ProtocolName,
		protocol_settings: &ProtocolSettings,
	) -> Result<AdapterRuntimeConfig, ConfigurableValueError> {
		let mut config =
			AdapterRuntimeConfig::new(protocol, self.effective_timeout_ms(protocol_settings));
		if let Some(endpoint) = &protocol_settings.endpoint {
			config = config.with_endpoint(endpoint.clone());
		}

		let headers = protocol_settings.resolve_headers()?;
		if !headers.is_empty() {
			config = config.with_headers(headers);
		}
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.timeouts.per_adapter_ms == 0 {
			return Err(ConfigValidationError::ZeroTimeout {
				scope: "timeouts.per_adapter_ms".to_string(),
			});
		}

		for (protocol, protocol_settings) in self.enabled_protocols()? {
			if protocol_settings.timeout_ms == Some(0) {
				return Err(ConfigValidationError::ZeroTimeout {
					scope: format!("protocol {}", protocol),
				});
			}
			let has_endpoint = protocol_settings
				.endpoint
				.as_deref()
				.is_some_and(|endpoint| !endpoint.trim().is_empty());
			if !has_endpoint {
				return Err(ConfigValidationError::MissingEndpoint(protocol));
			}
		}

		let rate_limiting = &self.environment.rate_limiting;
		if rate_limiting.enabled && rate_limiting.requests_per_minute == 0 {
			return Err(ConfigValidationError::InvalidRateLimit);
		}

		Ok(())
	}
}
