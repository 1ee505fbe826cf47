//! Lending Pool Aggregator Server

use lendpool_aggregator::AggregatorBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	AggregatorBuilder::new().start_server().await?;
	Ok(())
}
