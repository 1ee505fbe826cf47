//! Lending Pool Aggregator
//!
//! Fans one collateral-collection lookup out to every registered NFT lending
//! protocol adapter and returns the offers grouped per protocol.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use lendpool_adapters::{ClientCache, HttpOffersAdapter};
use lendpool_config::{ConfigLoadError, ConfigValidationError, ConfigurableValueError};
use thiserror::Error;
use tracing::{info, warn};

// Core domain types
pub use lendpool_types::{
	chrono, serde_json, Adapter, AdapterError, AdapterOutcome, AdapterResult,
	AdapterRuntimeConfig, AggregatedPoolsResponse, AggregatedResult, AggregationMetadata,
	AssetIdentifier, AssetValidationError, LendingAdapter, NormalizedOffer, ProtocolName,
	ProtocolStatus, RegistryError,
};

// Service layer
pub use lendpool_service::{AggregationRun, AggregatorError, AggregatorService, AggregatorTrait};

// API layer
pub use lendpool_api::{create_router, AppState};

// Adapters
pub use lendpool_adapters::AdapterRegistry;

// Config
pub use lendpool_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod models {
	pub use lendpool_types::*;
}

pub mod config {
	pub use lendpool_config::*;
}

pub mod adapters {
	pub use lendpool_adapters::*;
}

pub mod api {
	pub use lendpool_api::*;
}

pub mod service {
	pub use lendpool_service::*;
}

pub mod mocks;

pub use async_trait;
pub use reqwest;

/// Failures while assembling or starting the aggregator
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error(transparent)]
	Load(#[from] ConfigLoadError),

	#[error(transparent)]
	InvalidSettings(#[from] ConfigValidationError),

	#[error("Failed to resolve credentials for {protocol}: {source}")]
	Credentials {
		protocol: ProtocolName,
		#[source]
		source: ConfigurableValueError,
	},

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error("Invalid bind address '{address}': {reason}")]
	InvalidBindAddress { address: String, reason: String },

	#[error("Failed to initialise logging: {0}")]
	Tracing(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Builder for the aggregator registry, service and router
///
/// Protocols enabled in settings get an [`HttpOffersAdapter`] unless a custom
/// adapter was supplied for the same protocol; the custom adapter then takes
/// over that protocol's endpoint and timeout.
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	custom_adapters: Vec<(Box<dyn LendingAdapter>, Option<AdapterRuntimeConfig>)>,
	client_cache: ClientCache,
}

impl Default for AggregatorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AggregatorBuilder {
	pub fn new() -> Self {
		Self {
			settings: None,
			custom_adapters: Vec::new(),
			client_cache: ClientCache::new(),
		}
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Register a custom adapter
	///
	/// Registration errors (duplicates, invalid metadata) surface from
	/// [`AggregatorBuilder::start`].
	pub fn with_adapter(mut self, adapter: Box<dyn LendingAdapter>) -> Self {
		self.custom_adapters.push((adapter, None));
		self
	}

	/// Register a custom adapter with an explicit runtime config, ignoring settings
	pub fn with_adapter_config(
		mut self,
		adapter: Box<dyn LendingAdapter>,
		config: AdapterRuntimeConfig,
	) -> Self {
		self.custom_adapters.push((adapter, Some(config)));
		self
	}

	/// Build the registry: settings protocols in canonical order, then the
	/// remaining custom adapters in the order they were added
	fn build_registry(
		custom_adapters: Vec<(Box<dyn LendingAdapter>, Option<AdapterRuntimeConfig>)>,
		client_cache: &ClientCache,
		settings: &Settings,
	) -> Result<AdapterRegistry, BuilderError> {
		let mut registry = AdapterRegistry::new();
		let mut custom: Vec<Option<(Box<dyn LendingAdapter>, Option<AdapterRuntimeConfig>)>> =
			custom_adapters.into_iter().map(Some).collect();
		let mut configured = HashSet::new();

		for (protocol, protocol_settings) in settings.enabled_protocols()? {
			let runtime_config = settings
				.runtime_config(protocol, protocol_settings)
				.map_err(|source| BuilderError::Credentials { protocol, source })?;

			let replacement = custom
				.iter_mut()
				.find(|slot| {
					slot.as_ref()
						.is_some_and(|(adapter, _)| adapter.protocol() == protocol)
				})
				.and_then(Option::take);
			let (adapter, explicit_config) = match replacement {
				Some((adapter, explicit_config)) => (adapter, explicit_config),
				None => (
					Box::new(HttpOffersAdapter::new(protocol, client_cache.clone()))
						as Box<dyn LendingAdapter>,
					None,
				),
			};

			registry.register_with_config(adapter, explicit_config.unwrap_or(runtime_config))?;
			configured.insert(protocol);
		}

		for (adapter, explicit_config) in custom.into_iter().flatten() {
			let protocol = adapter.protocol();
			if configured.contains(&protocol) {
				return Err(RegistryError::AlreadyRegistered { protocol }.into());
			}
			let config = explicit_config.unwrap_or_else(|| {
				AdapterRuntimeConfig::new(protocol, settings.timeouts.per_adapter_ms)
			});
			registry.register_with_config(adapter, config)?;
		}

		Ok(registry)
	}

	fn init_tracing_from_settings(settings: &Settings) -> Result<(), BuilderError> {
		use lendpool_config::LogFormat;

		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));
		let structured = settings.logging.structured;

		let result = match settings.logging.format {
			LogFormat::Json => tracing_subscriber::fmt()
				.json()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
			LogFormat::Pretty => tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
			LogFormat::Compact => tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
		};
		result.map_err(|e| BuilderError::Tracing(e.to_string()))?;

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);
		Ok(())
	}

	/// Build the registry and service, returning the router with its state
	pub async fn start(self) -> Result<(axum::Router, AppState), BuilderError> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let registry = Self::build_registry(self.custom_adapters, &self.client_cache, &settings)?;
		if registry.is_empty() {
			warn!("No lending protocol adapters registered");
		}
		info!(
			"Initialized with {} protocol adapter(s): {:?}",
			registry.len(),
			registry.protocols()
		);

		let aggregator_service = AggregatorService::new(Arc::new(registry));
		let app_state = AppState::new(Arc::new(aggregator_service));
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Load `.env` and settings, initialise logging, then bind and serve
	pub async fn start_server(mut self) -> Result<(), BuilderError> {
		dotenvy::dotenv().ok();

		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		Self::init_tracing_from_settings(&settings)?;
		log_service_info(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr =
			bind_addr
				.parse()
				.map_err(|e: std::net::AddrParseError| BuilderError::InvalidBindAddress {
					address: bind_addr.clone(),
					reason: e.to_string(),
				})?;

		let rate_cfg = settings.environment.rate_limiting.clone();
		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  GET  /api/aggregated-pools?collectionAddress=0x...");
		info!("  GET  /api/v1/protocols");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		if rate_cfg.enabled {
			use std::time::Duration;
			use tower::limit::RateLimitLayer;
			use tower::ServiceBuilder;
			let make_svc = ServiceBuilder::new()
				.layer(RateLimitLayer::new(
					u64::from(rate_cfg.requests_per_minute),
					Duration::from_secs(60),
				))
				.service(app.into_make_service());
			axum::serve(listener, make_svc)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		} else {
			axum::serve(listener, app)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		}

		lendpool_config::log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
