//! Lending pool aggregator HTTP boundary
//!
//! Axum routes, handlers and middleware in front of the aggregation service.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use router::create_router;
pub use state::AppState;

#[cfg(feature = "openapi")]
pub mod openapi;
