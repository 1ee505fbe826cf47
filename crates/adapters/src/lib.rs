//! Lending pool adapters
//!
//! The adapter registry plus transport-level adapters shared by protocol
//! integrations.

pub mod client_cache;
pub mod http_adapter;
pub mod registry;

pub use client_cache::{ClientCache, ClientKey};
pub use http_adapter::HttpOffersAdapter;
pub use lendpool_types::{AdapterError, AdapterResult, LendingAdapter};
pub use registry::{AdapterRegistry, RegisteredAdapter};
