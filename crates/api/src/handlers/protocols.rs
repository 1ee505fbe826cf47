use axum::{extract::State, response::Json};
use lendpool_types::ProtocolName;
use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInfoResponse {
	pub protocol: ProtocolName,
	pub adapter_id: String,
	pub name: String,
	pub version: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProtocolsResponse {
	pub protocols: Vec<ProtocolInfoResponse>,
	pub total_protocols: usize,
}

/// GET /api/v1/protocols - Registered protocols in response order
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/protocols",
    responses((status = 200, description = "Registered protocols", body = ProtocolsResponse)),
    tag = "protocols"
))]
pub async fn get_protocols(State(state): State<AppState>) -> Json<ProtocolsResponse> {
	let protocols: Vec<ProtocolInfoResponse> = state
		.aggregator_service
		.registry()
		.iter()
		.map(|entry| ProtocolInfoResponse {
			protocol: entry.protocol(),
			adapter_id: entry.adapter.id().to_string(),
			name: entry.adapter.name().to_string(),
			version: entry.adapter.version().to_string(),
			timeout_ms: entry.timeout_ms(),
		})
		.collect();

	Json(ProtocolsResponse {
		total_protocols: protocols.len(),
		protocols,
	})
}
