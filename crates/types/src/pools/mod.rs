//! Aggregation outcomes and the merged per-protocol result

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::models::{NormalizedOffer, ProtocolName};

pub mod response;

pub use response::{AggregatedPoolsResponse, AggregationMetadata};

/// Why an adapter produced no offers for this request
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
	/// The adapter returned an error (or its task panicked)
	Error(String),
	/// The per-call timeout elapsed before the adapter settled
	TimedOut { timeout_ms: u64 },
}

/// Tagged result of invoking one adapter once
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome {
	Success(Vec<NormalizedOffer>),
	Failure(FailureReason),
}

impl AdapterOutcome {
	pub fn status(&self) -> ProtocolStatus {
		match self {
			AdapterOutcome::Success(_) => ProtocolStatus::Ok,
			AdapterOutcome::Failure(FailureReason::Error(_)) => ProtocolStatus::Failed,
			AdapterOutcome::Failure(FailureReason::TimedOut { .. }) => ProtocolStatus::TimedOut,
		}
	}
}

/// An adapter outcome tagged with its protocol and how long it took to settle
#[derive(Debug, Clone, PartialEq)]
pub struct SettledOutcome {
	pub protocol: ProtocolName,
	pub outcome: AdapterOutcome,
	pub duration_ms: u64,
}

impl SettledOutcome {
	pub fn new(protocol: ProtocolName, outcome: AdapterOutcome, duration_ms: u64) -> Self {
		Self {
			protocol,
			outcome,
			duration_ms,
		}
	}
}

/// Per-protocol status exposed next to the offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum ProtocolStatus {
	Ok,
	Failed,
	TimedOut,
}

/// What happened to one protocol during an aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProtocolReport {
	pub protocol: ProtocolName,
	pub status: ProtocolStatus,
	pub offers: usize,
	pub duration_ms: u64,
}

/// Offers per protocol, in registry order
///
/// Serializes as a JSON object whose keys keep that order. A protocol whose
/// adapter failed maps to an empty sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedResult {
	entries: Vec<(ProtocolName, Vec<NormalizedOffer>)>,
}

impl AggregatedResult {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a protocol entry; callers guarantee protocols are unique
	pub fn push(&mut self, protocol: ProtocolName, offers: Vec<NormalizedOffer>) {
		self.entries.push((protocol, offers));
	}

	pub fn get(&self, protocol: ProtocolName) -> Option<&[NormalizedOffer]> {
		self.entries
			.iter()
			.find(|(candidate, _)| *candidate == protocol)
			.map(|(_, offers)| offers.as_slice())
	}

	/// Protocol keys in registry order
	pub fn protocols(&self) -> impl Iterator<Item = ProtocolName> + '_ {
		self.entries.iter().map(|(protocol, _)| *protocol)
	}

	pub fn iter(&self) -> impl Iterator<Item = (ProtocolName, &[NormalizedOffer])> {
		self.entries
			.iter()
			.map(|(protocol, offers)| (*protocol, offers.as_slice()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn total_offers(&self) -> usize {
		self.entries.iter().map(|(_, offers)| offers.len()).sum()
	}
}

impl Serialize for AggregatedResult {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (protocol, offers) in &self.entries {
			map.serialize_entry(protocol.as_str(), offers)?;
		}
		map.end()
	}
}

/// Output of the result assembler
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
	pub pools: AggregatedResult,
	pub reports: Vec<ProtocolReport>,
}
