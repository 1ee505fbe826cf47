//! Lending pool aggregator types
//!
//! Domain models and the adapter contract shared by every crate in the
//! workspace.

pub mod adapters;
pub mod models;
pub mod pools;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{
	Adapter, AdapterError, AdapterResult, AdapterRuntimeConfig, AdapterValidationError,
	AdapterValidationResult, LendingAdapter, RegistryError, DEFAULT_ADAPTER_TIMEOUT_MS,
};

pub use models::{
	AssetIdentifier, AssetValidationError, NormalizedOffer, ProtocolName, SecretString,
	UnknownProtocolError,
};

pub use pools::{
	AdapterOutcome, AggregatedPoolsResponse, AggregatedResult, Aggregation, AggregationMetadata,
	FailureReason, ProtocolReport, ProtocolStatus, SettledOutcome,
};
