//! Core adapter trait for protocol integrations

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Adapter, AdapterResult, AdapterRuntimeConfig};
use crate::models::{AssetIdentifier, NormalizedOffer, ProtocolName};

/// Contract every lending protocol adapter implements
///
/// An adapter translates one upstream (REST endpoint, contract read, subgraph)
/// into [`NormalizedOffer`]s. How it reaches the upstream is its own business;
/// the aggregator only sees offers or an error.
#[async_trait]
pub trait LendingAdapter: Send + Sync + Debug {
	/// Static adapter metadata
	fn adapter_info(&self) -> &Adapter;

	/// Protocol this adapter answers for
	fn protocol(&self) -> ProtocolName;

	/// Adapter ID (for logging and the protocol listing)
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	fn version(&self) -> &str {
		&self.adapter_info().version
	}

	/// Fetch normalized offers for the given collateral collection
	///
	/// Implementations must not retry past `config.timeout_ms`; the aggregator
	/// abandons the call once it elapses.
	async fn fetch_offers(
		&self,
		asset: &AssetIdentifier,
		config: &AdapterRuntimeConfig,
	) -> AdapterResult<Vec<NormalizedOffer>>;

	/// Health check for the upstream
	///
	/// Defaults to healthy for adapters with no cheap probe.
	async fn health_check(&self, _config: &AdapterRuntimeConfig) -> AdapterResult<bool> {
		Ok(true)
	}
}
