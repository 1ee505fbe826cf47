//! Lending pool aggregation service
//!
//! Fan-out over the adapter registry and assembly of the per-protocol result.

pub mod aggregator;
pub mod assembler;

pub use aggregator::{
	AggregationRun, AggregatorError, AggregatorService, AggregatorTrait, ProtocolHealth,
};
pub use assembler::{assemble, AssemblyError};
