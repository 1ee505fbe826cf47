//! Response body for the aggregated pools endpoint

use serde::Serialize;

use super::{AggregatedResult, Aggregation, ProtocolReport, ProtocolStatus};

/// Summary of one aggregation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AggregationMetadata {
	pub total_duration_ms: u64,
	pub protocols_queried: usize,
	pub protocols_succeeded: usize,
	pub protocols_failed: usize,
	pub protocols_timed_out: usize,
	pub protocols: Vec<ProtocolReport>,
}

impl AggregationMetadata {
	pub fn from_reports(reports: Vec<ProtocolReport>, total_duration_ms: u64) -> Self {
		let count = |status: ProtocolStatus| reports.iter().filter(|r| r.status == status).count();

		Self {
			total_duration_ms,
			protocols_queried: reports.len(),
			protocols_succeeded: count(ProtocolStatus::Ok),
			protocols_failed: count(ProtocolStatus::Failed),
			protocols_timed_out: count(ProtocolStatus::TimedOut),
			protocols: reports,
		}
	}
}

/// `{ "pools": { "<protocol>": [...] }, "metadata": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AggregatedPoolsResponse {
	#[cfg_attr(feature = "openapi", schema(value_type = Object))]
	pub pools: AggregatedResult,
	pub metadata: AggregationMetadata,
}

impl AggregatedPoolsResponse {
	pub fn from_domain(aggregation: Aggregation, total_duration_ms: u64) -> Self {
		Self {
			pools: aggregation.pools,
			metadata: AggregationMetadata::from_reports(aggregation.reports, total_duration_ms),
		}
	}
}
