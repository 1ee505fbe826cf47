use utoipa::OpenApi;

use crate::handlers::common::ErrorResponse;
use crate::handlers::health::{ProtocolHealthResponse, ReadinessResponse};
use crate::handlers::protocols::{ProtocolInfoResponse, ProtocolsResponse};
use crate::handlers::{health, pools, protocols};
use lendpool_types::{
	AggregatedPoolsResponse, AggregationMetadata, AssetIdentifier, NormalizedOffer, ProtocolName,
	ProtocolReport, ProtocolStatus,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Lending Pool Aggregator API"),
    paths(
        health::health,
        health::ready,
        pools::get_aggregated_pools,
        protocols::get_protocols,
    ),
    components(schemas(
        AggregatedPoolsResponse, AggregationMetadata, ProtocolReport, ProtocolStatus,
        NormalizedOffer, ProtocolName, AssetIdentifier, ErrorResponse,
        ReadinessResponse, ProtocolHealthResponse, ProtocolsResponse, ProtocolInfoResponse
    )),
    tags(
        (name = "pools", description = "Aggregated lending pool offers"),
        (name = "protocols", description = "Registered protocol adapters"),
        (name = "health", description = "Health and readiness endpoints")
    )
)]
pub struct ApiDoc;
