use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{get_aggregated_pools, get_protocols, health, ready};
use crate::security::add_security_headers;
use crate::state::AppState;
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

/// Request bodies are never read; anything larger than this is rejected early
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(MAX_BODY_BYTES);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let base_router = Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.route("/ready", get(ready))
		.route("/api/aggregated-pools", get(get_aggregated_pools))
		.route("/api/aggregated-pools/", get(get_aggregated_pools))
		.route("/api/v1/protocols", get(get_protocols))
		.route("/api/v1/protocols/", get(get_protocols));

	#[cfg(feature = "openapi")]
	let router = base_router
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

	#[cfg(not(feature = "openapi"))]
	let router = base_router;

	let router = router
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use axum::{
		body::Body,
		http::{Request, StatusCode},
	};
	use lendpool_adapters::AdapterRegistry;
	use lendpool_service::{AggregationRun, AggregatorError, AggregatorTrait, ProtocolHealth};
	use lendpool_types::ProtocolName;
	use std::sync::Arc;
	use tower::ServiceExt;

	/// Aggregator with a fixed health picture and no adapters
	struct FixedHealth {
		registry: AdapterRegistry,
		health: Vec<(ProtocolName, bool)>,
	}

	#[async_trait]
	impl AggregatorTrait for FixedHealth {
		async fn aggregate(&self, collection: &str) -> Result<AggregationRun, AggregatorError> {
			Err(AggregatorError::InternalFault(format!(
				"not used for {}",
				collection
			)))
		}

		async fn health_check_all(&self) -> Vec<ProtocolHealth> {
			self.health
				.iter()
				.map(|(protocol, healthy)| ProtocolHealth {
					protocol: *protocol,
					healthy: *healthy,
				})
				.collect()
		}

		fn registry(&self) -> &AdapterRegistry {
			&self.registry
		}
	}

	fn app(health: Vec<(ProtocolName, bool)>) -> Router {
		create_router().with_state(AppState::new(Arc::new(FixedHealth {
			registry: AdapterRegistry::new(),
			health,
		})))
	}

	async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
		let response = app
			.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();
		let status = response.status();
		let body = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		(status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
	}

	#[tokio::test]
	async fn test_health_and_security_headers() {
		let response = app(vec![])
			.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let headers = response.headers();
		assert_eq!(headers["x-content-type-options"], "nosniff");
		assert_eq!(headers["x-frame-options"], "DENY");
		assert!(headers.contains_key("x-request-id"));
	}

	#[tokio::test]
	async fn test_ready_when_all_upstreams_healthy() {
		let (status, json) = get_json(
			app(vec![(ProtocolName::X2y2, true), (ProtocolName::Arcade, true)]),
			"/ready",
		)
		.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(json["status"], "ready");
		assert_eq!(json["protocols"][0]["protocol"], "x2y2");
		assert_eq!(json["protocols"][1]["protocol"], "arcade");
	}

	#[tokio::test]
	async fn test_ready_degraded_when_an_upstream_is_down() {
		let (status, json) = get_json(
			app(vec![(ProtocolName::X2y2, true), (ProtocolName::BendDao, false)]),
			"/ready",
		)
		.await;

		assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
		assert_eq!(json["status"], "degraded");
		assert_eq!(json["protocols"][1]["healthy"], false);
	}

	#[tokio::test]
	async fn test_protocols_listing_empty_registry() {
		let (status, json) = get_json(app(vec![]), "/api/v1/protocols").await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(json["totalProtocols"], 0);
		assert!(json["protocols"].as_array().unwrap().is_empty());
	}
}
