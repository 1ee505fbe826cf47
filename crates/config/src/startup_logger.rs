//! Service startup and shutdown banners

use crate::Settings;
use std::env;
use tracing::{info, warn};

/// Logs service identity and the effective configuration at startup
pub fn log_service_info(settings: &Settings) {
	info!("=== Lending Pool Aggregator Starting ===");
	info!("🚀 Service: lendpool-aggregator v{}", env!("CARGO_PKG_VERSION"));
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}
	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 RUST_LOG: {}", rust_log);
	}

	info!(
		"⏱️ Default adapter timeout: {}ms",
		settings.timeouts.per_adapter_ms
	);
	match settings.enabled_protocols() {
		Ok(protocols) if protocols.is_empty() => {
			warn!("⚠️ No protocols enabled; every aggregation will return an empty result");
		},
		Ok(protocols) => {
			for (protocol, protocol_settings) in protocols {
				let credential = protocol_settings
					.api_key
					.as_ref()
					.map(|key| key.description())
					.unwrap_or_else(|| "none".to_string());
				info!(
					"🔌 {} → {} ({}ms, api key: {})",
					protocol,
					protocol_settings.endpoint.as_deref().unwrap_or("-"),
					settings.effective_timeout_ms(protocol_settings),
					credential
				);
			}
		},
		Err(e) => warn!("⚠️ Protocol settings are invalid: {}", e),
	}

	if settings.environment.rate_limiting.enabled {
		info!(
			"🚦 Rate limiting: {} requests/minute",
			settings.environment.rate_limiting.requests_per_minute
		);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_service_shutdown() {
	info!("🛑 Lending Pool Aggregator Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Lending Pool Aggregator Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
}
