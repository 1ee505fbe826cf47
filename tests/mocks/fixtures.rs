//! Request fixtures and a stand-in upstream lending API

#![allow(dead_code)]

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;

/// Bored Ape Yacht Club, lowercase
pub const BAYC: &str = "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d";
/// Same collection with checksum casing and padding
pub const BAYC_MIXED_CASE: &str = "  0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D ";

pub fn pools_uri(collection: &str) -> String {
	format!("/api/aggregated-pools?collectionAddress={}", collection)
}

/// Upstream that echoes the requested collection back in two offers
pub fn healthy_upstream() -> Router {
	Router::new().route(
		"/pools",
		get(|Query(params): Query<HashMap<String, String>>| async move {
			let collection = params.get("collectionAddress").cloned().unwrap_or_default();
			Json(json!({
				"pools": [
					{ "poolAddress": "0x00000000000000000000000000000000000000a1", "collection": collection, "ltv": 0.35 },
					{ "poolAddress": "0x00000000000000000000000000000000000000a2", "collection": collection, "ltv": 0.30 }
				]
			}))
		}),
	)
}

/// Upstream that always answers 503
pub fn broken_upstream() -> Router {
	Router::new().route(
		"/pools",
		get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "maintenance" }))) }),
	)
}

pub async fn spawn_upstream(router: Router) -> String {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
		.await
		.expect("bind upstream port");
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		let _ = axum::serve(listener, router).await;
	});
	format!("http://{}", addr)
}

/// Keys of the `pools` object in the order they appear on the wire
pub fn pool_keys(body: &[u8]) -> Vec<String> {
	#[derive(Deserialize)]
	struct Envelope {
		pools: OrderedKeys,
	}

	let envelope: Envelope = serde_json::from_slice(body).expect("pools object");
	envelope.pools.0
}

struct OrderedKeys(Vec<String>);

impl<'de> Deserialize<'de> for OrderedKeys {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct KeysVisitor;

		impl<'de> Visitor<'de> for KeysVisitor {
			type Value = OrderedKeys;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("a JSON object")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OrderedKeys, A::Error> {
				let mut keys = Vec::new();
				while let Some(key) = map.next_key::<String>()? {
					map.next_value::<IgnoredAny>()?;
					keys.push(key);
				}
				Ok(OrderedKeys(keys))
			}
		}

		deserializer.deserialize_map(KeysVisitor)
	}
}
