//! Settings-configured HTTP adapters against stand-in upstream APIs

use lendpool_aggregator::config::{ConfigurableValue, ProtocolSettings};
use lendpool_aggregator::Settings;
use serde_json::Value;

use crate::mocks::fixtures::{
	broken_upstream, healthy_upstream, pool_keys, pools_uri, spawn_upstream, BAYC,
};
use crate::mocks::TestServer;

fn settings_for(protocols: Vec<(&str, ProtocolSettings)>) -> Settings {
	let mut settings = Settings::default();
	for (key, protocol_settings) in protocols {
		settings.protocols.insert(key.to_string(), protocol_settings);
	}
	settings
}

#[tokio::test]
async fn test_settings_protocols_served_in_canonical_order() {
	let healthy = spawn_upstream(healthy_upstream()).await;
	let broken = spawn_upstream(broken_upstream()).await;

	let mut zharta = ProtocolSettings::new(format!("{}/pools", healthy));
	zharta.api_key = Some(ConfigurableValue::from_plain("zh-test-key"));
	let settings = settings_for(vec![
		("zharta", zharta),
		("benddao", ProtocolSettings::new(format!("{}/pools", broken))),
		("x2y2", ProtocolSettings::new(format!("{}/pools", healthy))),
	]);

	let server = TestServer::spawn_with_settings(settings).await.unwrap();
	let response = reqwest::get(server.url(&pools_uri(BAYC))).await.unwrap();

	assert_eq!(response.status(), 200);
	let body = response.bytes().await.unwrap();
	assert_eq!(pool_keys(&body), vec!["x2y2", "bendDao", "zharta"]);

	let value: Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(value["pools"]["x2y2"].as_array().unwrap().len(), 2);
	assert_eq!(value["pools"]["x2y2"][0]["protocol"], "x2y2");
	assert_eq!(value["pools"]["x2y2"][0]["collection"], BAYC);
	assert!(value["pools"]["bendDao"].as_array().unwrap().is_empty());
	assert_eq!(value["pools"]["zharta"][1]["protocol"], "zharta");
	assert_eq!(value["metadata"]["protocols"][1]["status"], "failed");

	server.abort();
}

#[tokio::test]
async fn test_unreachable_upstream_is_an_empty_entry() {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let dead = format!("http://{}/pools", listener.local_addr().unwrap());
	drop(listener);

	let mut cyan = ProtocolSettings::new(dead);
	cyan.timeout_ms = Some(500);
	let server = TestServer::spawn_with_settings(settings_for(vec![("cyan", cyan)]))
		.await
		.unwrap();

	let value: Value = reqwest::get(server.url(&pools_uri(BAYC)))
		.await
		.unwrap()
		.json()
		.await
		.unwrap();

	assert_eq!(value["pools"]["cyan"], serde_json::json!([]));
	assert_ne!(value["metadata"]["protocols"][0]["status"], "ok");

	server.abort();
}

#[tokio::test]
async fn test_ready_degraded_when_upstream_down() {
	let healthy = spawn_upstream(healthy_upstream()).await;
	let broken = spawn_upstream(broken_upstream()).await;
	let settings = settings_for(vec![
		("nftfi", ProtocolSettings::new(format!("{}/pools", healthy))),
		("jpegd", ProtocolSettings::new(format!("{}/pools", broken))),
	]);

	let server = TestServer::spawn_with_settings(settings).await.unwrap();
	let response = reqwest::get(server.url("/ready")).await.unwrap();

	assert_eq!(response.status(), 503);
	let value: Value = response.json().await.unwrap();
	assert_eq!(value["status"], "degraded");
	assert_eq!(value["protocols"][0]["protocol"], "nftfi");
	assert_eq!(value["protocols"][0]["healthy"], true);
	assert_eq!(value["protocols"][1]["healthy"], false);

	server.abort();
}
