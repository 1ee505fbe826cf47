//! Timing-controlled lending adapters with call tracking

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lendpool_aggregator::mocks::sample_offer;
use lendpool_aggregator::{
	Adapter, AdapterError, AdapterResult, AdapterRuntimeConfig, AssetIdentifier, LendingAdapter,
	NormalizedOffer, ProtocolName,
};

/// Records every call an adapter receives
#[derive(Debug, Clone, Default)]
pub struct CallTracker {
	calls: Arc<AtomicUsize>,
	assets: Arc<Mutex<Vec<String>>>,
}

impl CallTracker {
	pub fn record_call(&self, asset: &AssetIdentifier) {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.assets.lock().unwrap().push(asset.to_string());
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	#[allow(dead_code)]
	pub fn assets(&self) -> Vec<String> {
		self.assets.lock().unwrap().clone()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
	Offers(usize),
	Fail,
	Panic,
}

/// Mock adapter that settles after a fixed delay
#[derive(Debug, Clone)]
pub struct TimingControlledAdapter {
	info: Adapter,
	protocol: ProtocolName,
	delay: Duration,
	behavior: Behavior,
	pub tracker: CallTracker,
}

impl TimingControlledAdapter {
	pub fn new(protocol: ProtocolName, delay_ms: u64, behavior: Behavior) -> Self {
		let slug = protocol.as_str().to_ascii_lowercase();
		Self {
			info: Adapter::new(
				format!("timing-{}", slug),
				format!("Timing Controlled {}", protocol),
				"1.0.0".to_string(),
			)
			.with_description(format!("Settles after {}ms", delay_ms)),
			protocol,
			delay: Duration::from_millis(delay_ms),
			behavior,
			tracker: CallTracker::default(),
		}
	}

	/// `count` offers after `delay_ms`
	pub fn offers(protocol: ProtocolName, delay_ms: u64, count: usize) -> Self {
		Self::new(protocol, delay_ms, Behavior::Offers(count))
	}

	pub fn failing(protocol: ProtocolName, delay_ms: u64) -> Self {
		Self::new(protocol, delay_ms, Behavior::Fail)
	}

	#[allow(dead_code)]
	pub fn panicking(protocol: ProtocolName) -> Self {
		Self::new(protocol, 0, Behavior::Panic)
	}

	pub fn call_count(&self) -> usize {
		self.tracker.call_count()
	}

	pub fn boxed(&self) -> Box<dyn LendingAdapter> {
		Box::new(self.clone())
	}
}

#[async_trait]
impl LendingAdapter for TimingControlledAdapter {
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
		self.tracker.record_call(asset);
		tokio::time::sleep(self.delay).await;

		match self.behavior {
			Behavior::Offers(count) => Ok((0..count)
				.map(|index| sample_offer(self.protocol, asset, index))
				.collect()),
			Behavior::Fail => Err(AdapterError::Upstream {
				protocol: self.protocol,
				message: "configured to fail".to_string(),
			}),
			Behavior::Panic => panic!("{} adapter panicked", self.protocol),
		}
	}
}
