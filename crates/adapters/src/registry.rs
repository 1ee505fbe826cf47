//! Ordered protocol → adapter registry
//!
//! Built once at startup and shared read-only (behind an `Arc`) by every
//! request; nothing mutates it after construction.

use lendpool_types::{
	AdapterRuntimeConfig, LendingAdapter, ProtocolName, RegistryError,
	DEFAULT_ADAPTER_TIMEOUT_MS,
};
use std::sync::Arc;
use tracing::info;

/// One registered adapter together with the runtime config it is called with
#[derive(Debug, Clone)]
pub struct RegisteredAdapter {
	pub adapter: Arc<dyn LendingAdapter>,
	pub config: AdapterRuntimeConfig,
}

impl RegisteredAdapter {
	pub fn protocol(&self) -> ProtocolName {
		self.config.protocol
	}

	pub fn timeout_ms(&self) -> u64 {
		self.config.timeout_ms
	}
}

/// Registry of protocol adapters in registration order
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
	entries: Vec<RegisteredAdapter>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an adapter using the default timeout
	pub fn register(&mut self, adapter: Box<dyn LendingAdapter>) -> Result<(), RegistryError> {
		let config = AdapterRuntimeConfig::new(adapter.protocol(), DEFAULT_ADAPTER_TIMEOUT_MS);
		self.register_with_config(adapter, config)
	}

	/// Register an adapter with an explicit runtime configuration
	///
	/// The protocol in `config` is overwritten with the adapter's own so the two
	/// can never disagree.
	pub fn register_with_config(
		&mut self,
		adapter: Box<dyn LendingAdapter>,
		mut config: AdapterRuntimeConfig,
	) -> Result<(), RegistryError> {
		let protocol = adapter.protocol();

		adapter
			.adapter_info()
			.validate()
			.map_err(|e| RegistryError::InvalidAdapter {
				adapter_id: adapter.id().to_string(),
				reason: e.to_string(),
			})?;

		if config.timeout_ms == 0 {
			return Err(RegistryError::InvalidTimeout {
				adapter_id: adapter.id().to_string(),
				timeout_ms: config.timeout_ms,
			});
		}

		if self.contains(protocol) {
			return Err(RegistryError::AlreadyRegistered { protocol });
		}

		config.protocol = protocol;
		info!(
			"Registered adapter {} for protocol {} ({}ms timeout)",
			adapter.id(),
			protocol,
			config.timeout_ms
		);
		self.entries.push(RegisteredAdapter {
			adapter: Arc::from(adapter),
			config,
		});
		Ok(())
	}

	pub fn get(&self, protocol: ProtocolName) -> Option<&RegisteredAdapter> {
		self.entries.iter().find(|entry| entry.protocol() == protocol)
	}

	pub fn contains(&self, protocol: ProtocolName) -> bool {
		self.get(protocol).is_some()
	}

	/// Registered protocols in registration order
	pub fn protocols(&self) -> Vec<ProtocolName> {
		self.entries.iter().map(RegisteredAdapter::protocol).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &RegisteredAdapter> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
