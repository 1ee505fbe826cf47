//! Fan-out aggregation across every registered lending protocol

use async_trait::async_trait;
use futures::future::join_all;
use lendpool_adapters::{AdapterRegistry, RegisteredAdapter};
use lendpool_types::{
	AdapterOutcome, Aggregation, AssetIdentifier, AssetValidationError, FailureReason,
	ProtocolName, SettledOutcome,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{timeout, Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::assembler::assemble;

#[derive(Debug, Error)]
pub enum AggregatorError {
	/// Malformed collection address; nothing was dispatched
	#[error("Invalid collection address: {0}")]
	InvalidInput(#[from] AssetValidationError),

	/// Defect in the aggregation logic itself
	#[error("Internal aggregation fault: {0}")]
	InternalFault(String),
}

/// Result of one aggregation call
#[derive(Debug, Clone)]
pub struct AggregationRun {
	pub asset: AssetIdentifier,
	pub aggregation: Aggregation,
	pub total_duration_ms: u64,
}

/// Health of one protocol's upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolHealth {
	pub protocol: ProtocolName,
	pub healthy: bool,
}

/// Aggregation operations used by the API layer
#[async_trait]
pub trait AggregatorTrait: Send + Sync {
	/// Validate `collection_address` and aggregate offers from every adapter
	async fn aggregate(&self, collection_address: &str) -> Result<AggregationRun, AggregatorError>;

	/// Probe every adapter's upstream concurrently
	async fn health_check_all(&self) -> Vec<ProtocolHealth>;

	fn registry(&self) -> &AdapterRegistry;
}

/// Stateless fan-out aggregator over a fixed adapter registry
pub struct AggregatorService {
	registry: Arc<AdapterRegistry>,
}

impl AggregatorService {
	pub fn new(registry: Arc<AdapterRegistry>) -> Self {
		Self { registry }
	}

	/// Aggregate offers for an already validated asset
	///
	/// Spawns one task per registered adapter, each bounded by its own
	/// timeout, and waits for all of them. Adapter failures never abort the
	/// aggregation; they show up as empty entries.
	pub async fn aggregate_asset(
		&self,
		asset: AssetIdentifier,
	) -> Result<AggregationRun, AggregatorError> {
		let started = Instant::now();
		let protocols = self.registry.protocols();
		info!(
			"Aggregating pools for {} from {} protocols",
			asset,
			protocols.len()
		);

		let shared_asset = Arc::new(asset.clone());
		let tasks = self.registry.iter().map(|entry| {
			let entry = entry.clone();
			let asset = Arc::clone(&shared_asset);
			tokio::spawn(async move { invoke_adapter(entry, &asset).await })
		});

		let joined = join_all(tasks).await;

		let outcomes: Vec<SettledOutcome> = protocols
			.iter()
			.zip(joined)
			.map(|(protocol, result)| match result {
				Ok(settled) => settled,
				Err(join_error) => {
					warn!("Adapter task for {} did not complete: {}", protocol, join_error);
					SettledOutcome::new(
						*protocol,
						AdapterOutcome::Failure(FailureReason::Error(format!(
							"adapter task failed: {}",
							join_error
						))),
						elapsed_ms(started),
					)
				},
			})
			.collect();

		let aggregation = assemble(&protocols, &outcomes).map_err(|e| {
			error!("Failed to assemble aggregation for {}: {}", asset, e);
			AggregatorError::InternalFault(e.to_string())
		})?;

		let total_duration_ms = elapsed_ms(started);
		info!(
			"Aggregation completed for {}: {} offers from {} protocols in {}ms",
			asset,
			aggregation.pools.total_offers(),
			protocols.len(),
			total_duration_ms
		);

		Ok(AggregationRun {
			asset,
			aggregation,
			total_duration_ms,
		})
	}
}

#[async_trait]
impl AggregatorTrait for AggregatorService {
	async fn aggregate(&self, collection_address: &str) -> Result<AggregationRun, AggregatorError> {
		let asset = AssetIdentifier::parse(collection_address).map_err(|e| {
			debug!("Rejected collection address '{}': {}", collection_address, e);
			AggregatorError::InvalidInput(e)
		})?;
		self.aggregate_asset(asset).await
	}

	async fn health_check_all(&self) -> Vec<ProtocolHealth> {
		let checks = self.registry.iter().map(|entry| {
			let entry = entry.clone();
			tokio::spawn(async move {
				let limit = Duration::from_millis(entry.timeout_ms());
				match timeout(limit, entry.adapter.health_check(&entry.config)).await {
					Ok(Ok(healthy)) => healthy,
					Ok(Err(e)) => {
						warn!("Health check failed for {}: {}", entry.protocol(), e);
						false
					},
					Err(_) => {
						warn!("Health check timed out for {}", entry.protocol());
						false
					},
				}
			})
		});

		let results = join_all(checks).await;
		self.registry
			.protocols()
			.into_iter()
			.zip(results)
			.map(|(protocol, result)| ProtocolHealth {
				protocol,
				healthy: result.unwrap_or(false),
			})
			.collect()
	}

	fn registry(&self) -> &AdapterRegistry {
		&self.registry
	}
}

/// Call one adapter under its own timeout and tag the outcome
async fn invoke_adapter(entry: RegisteredAdapter, asset: &AssetIdentifier) -> SettledOutcome {
	let protocol = entry.protocol();
	let timeout_ms = entry.timeout_ms();
	let started = Instant::now();
	debug!("Dispatching {} via adapter {}", protocol, entry.adapter.id());

	let fetch = entry.adapter.fetch_offers(asset, &entry.config);
	let outcome = match timeout(Duration::from_millis(timeout_ms), fetch).await {
		Ok(Ok(offers)) => {
			debug!("{} returned {} offers", protocol, offers.len());
			AdapterOutcome::Success(offers)
		},
		Ok(Err(e)) => {
			warn!("{} adapter returned error: {}", protocol, e);
			AdapterOutcome::Failure(FailureReason::Error(e.to_string()))
		},
		Err(_) => {
			warn!("{} adapter timed out after {}ms", protocol, timeout_ms);
			AdapterOutcome::Failure(FailureReason::TimedOut { timeout_ms })
		},
	};

	SettledOutcome::new(protocol, outcome, elapsed_ms(started))
}

fn elapsed_ms(started: Instant) -> u64 {
	u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
