//! Fan-out behavior observed through a spawned server

use std::time::{Duration, Instant};

use lendpool_aggregator::{AdapterRuntimeConfig, AggregatorBuilder, ProtocolName};
use serde_json::Value;

use crate::mocks::fixtures::{pool_keys, pools_uri, BAYC};
use crate::mocks::{TestServer, TimingControlledAdapter};

#[tokio::test]
async fn test_mixed_outcomes_bounded_by_slowest_timeout() {
	let fast = TimingControlledAdapter::offers(ProtocolName::X2y2, 50, 2);
	let failing = TimingControlledAdapter::failing(ProtocolName::BendDao, 200);
	let hanging = TimingControlledAdapter::offers(ProtocolName::Cyan, 5_000, 1);

	let server = TestServer::spawn(
		AggregatorBuilder::new()
			.with_adapter(fast.boxed())
			.with_adapter(failing.boxed())
			.with_adapter_config(
				hanging.boxed(),
				AdapterRuntimeConfig::new(ProtocolName::Cyan, 300),
			),
	)
	.await
	.unwrap();

	let started = Instant::now();
	let response = reqwest::get(server.url(&pools_uri(BAYC))).await.unwrap();
	let elapsed = started.elapsed();

	assert_eq!(response.status(), 200);
	let body = response.bytes().await.unwrap();
	assert_eq!(pool_keys(&body), vec!["x2y2", "bendDao", "cyan"]);

	let value: Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(value["pools"]["x2y2"].as_array().unwrap().len(), 2);
	assert!(value["pools"]["bendDao"].as_array().unwrap().is_empty());
	assert!(value["pools"]["cyan"].as_array().unwrap().is_empty());

	assert!(elapsed >= Duration::from_millis(300), "elapsed {:?}", elapsed);
	assert!(elapsed < Duration::from_millis(2_000), "elapsed {:?}", elapsed);

	assert_eq!(fast.call_count(), 1);
	assert_eq!(failing.call_count(), 1);
	assert_eq!(hanging.call_count(), 1);

	server.abort();
}

#[tokio::test]
async fn test_concurrent_requests_do_not_share_results() {
	let nftfi = TimingControlledAdapter::offers(ProtocolName::Nftfi, 100, 1);
	let server = TestServer::spawn(AggregatorBuilder::new().with_adapter(nftfi.boxed()))
		.await
		.unwrap();

	let other = "0x60e4d786628fea6478f785a6d7e704777c86a7c6";
	let client = reqwest::Client::new();
	let (first, second) = tokio::join!(
		client.get(server.url(&pools_uri(BAYC))).send(),
		client.get(server.url(&pools_uri(other))).send()
	);

	let first: Value = first.unwrap().json().await.unwrap();
	let second: Value = second.unwrap().json().await.unwrap();
	assert_eq!(first["pools"]["nftfi"][0]["collection"], BAYC);
	assert_eq!(second["pools"]["nftfi"][0]["collection"], other);

	let mut seen = nftfi.tracker.assets();
	seen.sort();
	assert_eq!(seen, vec![other.to_string(), BAYC.to_string()]);

	server.abort();
}

#[tokio::test]
async fn test_invalid_address_over_http() {
	let arcade = TimingControlledAdapter::offers(ProtocolName::Arcade, 0, 1);
	let server = TestServer::spawn(AggregatorBuilder::new().with_adapter(arcade.boxed()))
		.await
		.unwrap();

	let response = reqwest::get(server.url(&pools_uri("0xnothex")))
		.await
		.unwrap();

	assert_eq!(response.status(), 400);
	let value: Value = response.json().await.unwrap();
	assert_eq!(value["error"], "VALIDATION_ERROR");
	assert!(value["timestamp"].is_i64());
	assert_eq!(arcade.call_count(), 0);

	server.abort();
}
