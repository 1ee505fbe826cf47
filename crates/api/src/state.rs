use std::sync::Arc;

use lendpool_service::AggregatorTrait;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub aggregator_service: Arc<dyn AggregatorTrait>,
}

impl AppState {
	pub fn new(aggregator_service: Arc<dyn AggregatorTrait>) -> Self {
		Self { aggregator_service }
	}
}
