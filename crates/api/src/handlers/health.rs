use axum::{extract::State, http::StatusCode, response::Json};
use lendpool_types::ProtocolName;
use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check endpoint
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service healthy", body = String)),
    tag = "health"
))]
pub async fn health() -> &'static str {
	"OK"
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProtocolHealthResponse {
	pub protocol: ProtocolName,
	pub healthy: bool,
}

/// Readiness response
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReadinessResponse {
	pub status: String,
	pub protocols: Vec<ProtocolHealthResponse>,
}

/// GET /ready - Readiness probe across every registered protocol upstream
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "All upstreams healthy", body = ReadinessResponse),
        (status = 503, description = "At least one upstream unhealthy", body = ReadinessResponse)
    ),
    tag = "health"
))]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let protocols: Vec<ProtocolHealthResponse> = state
		.aggregator_service
		.health_check_all()
		.await
		.into_iter()
		.map(|health| ProtocolHealthResponse {
			protocol: health.protocol,
			healthy: health.healthy,
		})
		.collect();

	let healthy = protocols.iter().all(|p| p.healthy);
	let (code, status) = if healthy {
		(StatusCode::OK, "ready")
	} else {
		(StatusCode::SERVICE_UNAVAILABLE, "degraded")
	};

	(
		code,
		Json(ReadinessResponse {
			status: status.to_string(),
			protocols,
		}),
	)
}
