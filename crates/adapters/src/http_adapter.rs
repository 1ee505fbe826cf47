//! Generic HTTP adapter for upstreams that already serve normalized offers
//!
//! Issues `GET <endpoint>?collectionAddress=<asset>` and accepts either a bare
//! JSON array of offer records or an object with a `pools` array. Every
//! record is stamped with the protocol this adapter is registered for.

use async_trait::async_trait;
use lendpool_types::{
	Adapter, AdapterError, AdapterResult, AdapterRuntimeConfig, AssetIdentifier, LendingAdapter,
	NormalizedOffer, ProtocolName,
};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::client_cache::ClientCache;

/// Query parameter carrying the collection address upstream
pub const COLLECTION_QUERY_PARAM: &str = "collectionAddress";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UpstreamBody {
	List(Vec<UpstreamOffer>),
	Wrapped { pools: Vec<UpstreamOffer> },
}

impl UpstreamBody {
	fn into_offers(self) -> Vec<UpstreamOffer> {
		match self {
			UpstreamBody::List(offers) | UpstreamBody::Wrapped { pools: offers } => offers,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamOffer {
	#[serde(alias = "address")]
	pool_address: String,
	#[serde(default, alias = "nftContract")]
	collection: Option<String>,
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	symbol: Option<String>,
	#[serde(default)]
	ltv: Option<f64>,
	#[serde(default, alias = "currentAnnualInterest")]
	annual_interest: Option<f64>,
	#[serde(default, alias = "maxLoanLength")]
	max_loan_duration_secs: Option<u64>,
	#[serde(default)]
	max_nfts_to_borrow: Option<u32>,
	#[serde(default)]
	available_liquidity: Option<String>,
	#[serde(default)]
	currency: Option<String>,
}

impl UpstreamOffer {
	fn normalize(self, protocol: ProtocolName, asset: &AssetIdentifier) -> NormalizedOffer {
		NormalizedOffer {
			protocol,
			pool_address: self.pool_address,
			collection: self
				.collection
				.unwrap_or_else(|| asset.as_str().to_string()),
			name: self.name,
			symbol: self.symbol,
			ltv: self.ltv,
			annual_interest: self.annual_interest,
			max_loan_duration_secs: self.max_loan_duration_secs,
			max_nfts_to_borrow: self.max_nfts_to_borrow,
			available_liquidity: self.available_liquidity,
			currency: self.currency,
		}
	}
}

/// HTTP transport adapter bound to one protocol
#[derive(Debug)]
pub struct HttpOffersAdapter {
	info: Adapter,
	protocol: ProtocolName,
	cache: ClientCache,
}

impl HttpOffersAdapter {
	pub fn new(protocol: ProtocolName, cache: ClientCache) -> Self {
		let slug = protocol.as_str().to_ascii_lowercase();
		let info = Adapter::new(
			format!("{}-http-v1", slug),
			format!("{} HTTP Adapter", protocol),
			"1.0.0".to_string(),
		)
		.with_description(format!("Normalized offers for {} fetched over HTTP", protocol));

		Self {
			info,
			protocol,
			cache,
		}
	}

	fn endpoint<'a>(&self, config: &'a AdapterRuntimeConfig) -> AdapterResult<&'a str> {
		config
			.endpoint
			.as_deref()
			.ok_or_else(|| AdapterError::ConfigError {
				reason: format!("No endpoint configured for protocol {}", self.protocol),
			})
	}

	fn offers_url(&self, endpoint: &str, asset: &AssetIdentifier) -> AdapterResult<Url> {
		Url::parse_with_params(endpoint, &[(COLLECTION_QUERY_PARAM, asset.as_str())]).map_err(
			|e| AdapterError::ConfigError {
				reason: format!("Invalid endpoint '{}': {}", endpoint, e),
			},
		)
	}
}

#[async_trait]
impl LendingAdapter for HttpOffersAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.info
	}

	fn protocol(&self) -> ProtocolName {
		self.protocol
	}

	async fn fetch_offers(
		&self,
		asset: &AssetIdentifier,
		config: &AdapterRuntimeConfig,
	) -> AdapterResult<Vec<NormalizedOffer>> {
		let url = self.offers_url(self.endpoint(config)?, asset)?;
		debug!("{} adapter fetching offers from {}", self.protocol, url);

		let client = self.cache.get_client(config)?;
		let response = client.get(url).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_failure(status.as_u16()));
		}

		let bytes = response.bytes().await?;
		let body: UpstreamBody =
			serde_json::from_slice(&bytes).map_err(|e| AdapterError::InvalidResponse {
				reason: format!("{} returned an undecodable body: {}", self.protocol, e),
			})?;

		let offers: Vec<NormalizedOffer> = body
			.into_offers()
			.into_iter()
			.map(|offer| offer.normalize(self.protocol, asset))
			.collect();

		debug!("{} adapter normalized {} offers", self.protocol, offers.len());
		Ok(offers)
	}

	async fn health_check(&self, config: &AdapterRuntimeConfig) -> AdapterResult<bool> {
		let endpoint = self.endpoint(config)?;
		let client = self.cache.get_client(config)?;
		let response = client.get(endpoint).send().await?;
		Ok(!response.status().is_server_error())
	}
}
