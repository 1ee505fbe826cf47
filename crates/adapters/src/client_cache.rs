//! HTTP client cache for upstream connection reuse
//!
//! One `reqwest::Client` per distinct endpoint/header/timeout combination,
//! recreated after a TTL. This only pools connections; responses are never
//! cached.

use dashmap::{mapref::entry::Entry, DashMap};
use lendpool_types::{AdapterError, AdapterResult, AdapterRuntimeConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const USER_AGENT: &str = "LendPool-Aggregator/1.0";

/// Key identifying an interchangeable HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey {
	pub base_url: String,
	pub timeout_ms: u64,
	pub max_idle_per_host: usize,
	/// Sorted so equal header sets hash equally
	pub headers: Vec<(String, String)>,
}

impl ClientKey {
	pub fn from_runtime_config(config: &AdapterRuntimeConfig) -> Self {
		let mut headers: Vec<(String, String)> = config
			.headers
			.iter()
			.flatten()
			.map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
			.collect();
		headers.sort();

		Self {
			base_url: config.endpoint.clone().unwrap_or_default(),
			timeout_ms: config.timeout_ms,
			max_idle_per_host: 10,
			headers,
		}
	}
}

#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache of HTTP clients with TTL
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientKey, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a new client cache with the default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create a client for the given adapter configuration
	pub fn get_client(&self, config: &AdapterRuntimeConfig) -> AdapterResult<Arc<Client>> {
		self.get_client_for_key(&ClientKey::from_runtime_config(config))
	}

	pub fn get_client_for_key(&self, key: &ClientKey) -> AdapterResult<Arc<Client>> {
		self.clients.remove_if(key, |_, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				warn!(
					"Client cache expired for {} (age: {:?}), will create new client",
					key.base_url,
					cached.created_at.elapsed()
				);
			}
			expired
		});

		if let Some(cached) = self.clients.get(key) {
			debug!("Reusing cached client for {}", key.base_url);
			return Ok(Arc::clone(&cached.client));
		}

		debug!("Creating new client for {}", key.base_url);
		let client = Arc::new(build_client(key)?);

		match self.clients.entry(key.clone()) {
			// Another task raced us; prefer the client already stored
			Entry::Occupied(entry) => Ok(Arc::clone(&entry.get().client)),
			Entry::Vacant(entry) => {
				entry.insert(CachedClient {
					client: Arc::clone(&client),
					created_at: Instant::now(),
				});
				Ok(client)
			},
		}
	}

	/// Drop expired clients, returning how many were removed
	pub fn cleanup_expired(&self) -> usize {
		let before = self.clients.len();
		self.clients.retain(|_, cached| !cached.is_expired(self.ttl));
		let removed = before.saturating_sub(self.clients.len());
		if removed > 0 {
			debug!("Cleaned up {} expired clients from cache", removed);
		}
		removed
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

fn build_client(key: &ClientKey) -> AdapterResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert(
		reqwest::header::USER_AGENT,
		HeaderValue::from_static(USER_AGENT),
	);
	headers.insert(
		reqwest::header::ACCEPT,
		HeaderValue::from_static("application/json"),
	);
	for (name, value) in &key.headers {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				headers.insert(name, value);
			},
			_ => warn!("Skipping invalid upstream header '{}'", name),
		}
	}

	ClientBuilder::new()
		.default_headers(headers)
		.timeout(Duration::from_millis(key.timeout_ms))
		.pool_max_idle_per_host(key.max_idle_per_host)
		.pool_idle_timeout(Duration::from_secs(90))
		.tcp_keepalive(Duration::from_secs(60))
		.build()
		.map_err(AdapterError::HttpError)
}
