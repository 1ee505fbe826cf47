//! Shared domain models used by adapters, the aggregator and the API

pub mod asset;
pub mod offer;
pub mod protocol;
pub mod secret_string;

pub use asset::{AssetIdentifier, AssetValidationError};
pub use offer::NormalizedOffer;
pub use protocol::{ProtocolName, UnknownProtocolError};
pub use secret_string::SecretString;
