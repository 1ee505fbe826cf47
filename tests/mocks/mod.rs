//! Shared mocks and fixtures for integration tests

pub mod adapters;
pub mod fixtures;
pub mod test_server;

#[allow(unused_imports)]
pub use adapters::{CallTracker, TimingControlledAdapter};
#[allow(unused_imports)]
pub use test_server::TestServer;
