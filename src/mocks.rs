//! Mock lending adapters for demos and tests

use std::time::Duration;

use async_trait::async_trait;
use lendpool_types::{
	Adapter, AdapterError, AdapterResult, AdapterRuntimeConfig, AssetIdentifier, LendingAdapter,
	NormalizedOffer, ProtocolName,
};

#[derive(Debug, Clone)]
pub enum MockBehavior {
	/// Return this many synthetic offers
	Offers(usize),
	/// Fail with an upstream error carrying this message
	Fail(String),
}

/// Adapter that answers from memory after an optional delay
#[derive(Debug, Clone)]
pub struct MockLendingAdapter {
	info: Adapter,
	protocol: ProtocolName,
	behavior: MockBehavior,
	delay: Duration,
}

impl MockLendingAdapter {
	pub fn new(protocol: ProtocolName, behavior: MockBehavior) -> Self {
		let slug = protocol.as_str().to_ascii_lowercase();
		Self {
			info: Adapter::new(
				format!("mock-{}-v1", slug),
				format!("Mock {} Adapter", protocol),
				"1.0.0".to_string(),
			)
			.with_description(format!("In-memory offers for {}", protocol)),
			protocol,
			behavior,
			delay: Duration::ZERO,
		}
	}

	pub fn with_offers(protocol: ProtocolName, count: usize) -> Self {
		Self::new(protocol, MockBehavior::Offers(count))
	}

	pub fn failing(protocol: ProtocolName, message: impl Into<String>) -> Self {
		Self::new(protocol, MockBehavior::Fail(message.into()))
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn boxed(self) -> Box<dyn LendingAdapter> {
		Box::new(self)
	}
}

/// Deterministic offer for `protocol` at position `index`
pub fn sample_offer(
	protocol: ProtocolName,
	collection: &AssetIdentifier,
	index: usize,
) -> NormalizedOffer {
	NormalizedOffer::new(
		protocol,
		format!("0x{:040x}", index + 1),
		collection.as_str(),
	)
	.with_name(format!("{} pool #{}", protocol, index + 1))
	.with_terms(0.3, 0.12 + index as f64 / 100.0)
	.with_max_loan_duration_secs(30 * 24 * 3600)
	.with_liquidity("1000000000000000000", "WETH")
}

#[async_trait]
impl LendingAdapter for MockLendingAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.info
	}

	fn protocol(&self) -> ProtocolName {
		self.protocol
	}

	async fn fetch_offers(
		&self,
		asset: &AssetIdentifier,
		_config: &AdapterRuntimeConfig,
	) -> AdapterResult<Vec<NormalizedOffer>> {
		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}

		match &self.behavior {
			MockBehavior::Offers(count) => Ok((0..*count)
				.map(|index| sample_offer(self.protocol, asset, index))
				.collect()),
			MockBehavior::Fail(message) => Err(AdapterError::Upstream {
				protocol: self.protocol,
				message: message.clone(),
			}),
		}
	}
}
