//! Adapter domain model and the contract every protocol adapter implements

use std::collections::HashMap;

pub mod errors;
pub mod traits;

pub use errors::{AdapterError, AdapterValidationError, RegistryError};
pub use traits::LendingAdapter;

use crate::models::ProtocolName;

/// Result types for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
pub type AdapterValidationResult<T> = Result<T, AdapterValidationError>;

/// Default per-call timeout when neither the protocol nor the settings set one
pub const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 5_000;

/// Runtime configuration handed to an adapter on every call
///
/// Holds only what adapter implementations need; the registry owns one per
/// registered protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterRuntimeConfig {
	pub protocol: ProtocolName,

	/// Upstream endpoint, when the adapter is HTTP based
	pub endpoint: Option<String>,

	/// Per-call timeout in milliseconds, enforced by the aggregator
	pub timeout_ms: u64,

	/// Extra headers for upstream requests (API keys already resolved)
	pub headers: Option<HashMap<String, String>>,
}

impl AdapterRuntimeConfig {
	pub fn new(protocol: ProtocolName, timeout_ms: u64) -> Self {
		Self {
			protocol,
			endpoint: None,
			timeout_ms,
			headers: None,
		}
	}

	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = Some(endpoint.into());
		self
	}

	pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
		self.headers = Some(headers);
		self
	}
}

/// Static description of an adapter implementation
#[derive(Debug, Clone, PartialEq)]
pub struct Adapter {
	/// Unique identifier for the adapter
	pub adapter_id: String,

	/// Human-readable name
	pub name: String,

	pub description: Option<String>,

	/// Version of the adapter implementation
	pub version: String,
}

impl Adapter {
	pub fn new(adapter_id: String, name: String, version: String) -> Self {
		Self {
			adapter_id,
			name,
			description: None,
			version,
		}
	}

	pub fn with_description(mut self, description: String) -> Self {
		self.description = Some(description);
		self
	}

	/// Validate the adapter metadata
	pub fn validate(&self) -> AdapterValidationResult<()> {
		if self.adapter_id.is_empty() {
			return Err(AdapterValidationError::MissingRequiredField {
				field: "adapter_id".to_string(),
			});
		}

		if !self
			.adapter_id
			.chars()
			.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
		{
			return Err(AdapterValidationError::InvalidAdapterId {
				adapter_id: self.adapter_id.clone(),
			});
		}

		if self.name.is_empty() {
			return Err(AdapterValidationError::MissingRequiredField {
				field: "name".to_string(),
			});
		}

		if !is_valid_semver(&self.version) {
			return Err(AdapterValidationError::InvalidVersion {
				version: self.version.clone(),
			});
		}

		Ok(())
	}
}

/// Basic X.Y.Z check
fn is_valid_semver(version: &str) -> bool {
	let parts: Vec<&str> = version.split('.').collect();
	parts.len() == 3 && parts.iter().all(|part| part.parse::<u32>().is_ok())
}
