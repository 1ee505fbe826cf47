use axum::{
	extract::{Query, State},
	response::Json,
};
use lendpool_service::AggregatorError;
use lendpool_types::AggregatedPoolsResponse;
use tracing::{error, info};

use crate::handlers::common::{bad_request, ApiError};
use crate::state::AppState;

/// Query parameter naming the collateral collection
pub const COLLECTION_ADDRESS_PARAM: &str = "collectionAddress";

/// Pick the single collection address out of the raw query pairs
///
/// A repeated parameter is not a scalar and is rejected like a missing one.
fn collection_address(params: &[(String, String)]) -> Result<&str, ApiError> {
	let mut values = params
		.iter()
		.filter(|(key, _)| key == COLLECTION_ADDRESS_PARAM)
		.map(|(_, value)| value.as_str());

	match (values.next(), values.next()) {
		(None, _) => Err(bad_request(
			"MISSING_PARAMETER",
			format!("Missing required query parameter '{}'", COLLECTION_ADDRESS_PARAM),
		)),
		(Some(_), Some(_)) => Err(bad_request(
			"INVALID_PARAMETER",
			format!("Query parameter '{}' must be a single string", COLLECTION_ADDRESS_PARAM),
		)),
		(Some(value), None) => Ok(value),
	}
}

/// Aggregate lending pools for one collateral collection
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/aggregated-pools",
    params(("collectionAddress" = String, Query, description = "NFT collection address (0x + 40 hex digits)")),
    responses(
        (status = 200, description = "Pools aggregated across every registered protocol", body = AggregatedPoolsResponse),
        (status = 400, description = "Missing or invalid collection address", body = crate::handlers::common::ErrorResponse)
    ),
    tag = "pools"
))]
/// GET /api/aggregated-pools?collectionAddress=0x...
pub async fn get_aggregated_pools(
	State(state): State<AppState>,
	Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<AggregatedPoolsResponse>, ApiError> {
	let collection = collection_address(&params)?;
	info!("Received aggregated pools request for {}", collection);

	let run = match state.aggregator_service.aggregate(collection).await {
		Ok(run) => run,
		Err(AggregatorError::InvalidInput(e)) => {
			return Err(bad_request(
				"VALIDATION_ERROR",
				format!("Invalid collection address: {}", e),
			));
		},
		Err(AggregatorError::InternalFault(reason)) => {
			error!("Aggregation failed for {}: {}", collection, reason);
			return Err(bad_request("AGGREGATION_ERROR", "Failed to aggregate pools"));
		},
	};

	info!(
		"Returning {} offers from {} protocols for {} ({}ms)",
		run.aggregation.pools.total_offers(),
		run.aggregation.pools.len(),
		run.asset,
		run.total_duration_ms
	);
	Ok(Json(AggregatedPoolsResponse::from_domain(
		run.aggregation,
		run.total_duration_ms,
	)))
}
