//! Closed set of supported lending protocols

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown lending protocol: {0}")]
pub struct UnknownProtocolError(pub String);

/// Lending protocol an adapter speaks for
///
/// The serialized names are the keys used in the aggregated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ProtocolName {
	#[serde(rename = "x2y2")]
	X2y2,
	#[serde(rename = "nftfi")]
	Nftfi,
	#[serde(rename = "arcade")]
	Arcade,
	#[serde(rename = "bendDao")]
	BendDao,
	#[serde(rename = "jpegd")]
	Jpegd,
	#[serde(rename = "paraspace")]
	Paraspace,
	#[serde(rename = "cyan")]
	Cyan,
	#[serde(rename = "zharta")]
	Zharta,
}

impl ProtocolName {
	/// Every supported protocol, in the canonical response order
	pub const ALL: [ProtocolName; 8] = [
		ProtocolName::X2y2,
		ProtocolName::Nftfi,
		ProtocolName::Arcade,
		ProtocolName::BendDao,
		ProtocolName::Jpegd,
		ProtocolName::Paraspace,
		ProtocolName::Cyan,
		ProtocolName::Zharta,
	];

	/// Wire name of the protocol
	pub fn as_str(&self) -> &'static str {
		match self {
			ProtocolName::X2y2 => "x2y2",
			ProtocolName::Nftfi => "nftfi",
			ProtocolName::Arcade => "arcade",
			ProtocolName::BendDao => "bendDao",
			ProtocolName::Jpegd => "jpegd",
			ProtocolName::Paraspace => "paraspace",
			ProtocolName::Cyan => "cyan",
			ProtocolName::Zharta => "zharta",
		}
	}
}

impl fmt::Display for ProtocolName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// Case-insensitive: configuration sources lowercase their keys.
impl FromStr for ProtocolName {
	type Err = UnknownProtocolError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let needle = s.trim();
		Self::ALL
			.iter()
			.copied()
			.find(|protocol| protocol.as_str().eq_ignore_ascii_case(needle))
			.ok_or_else(|| UnknownProtocolError(needle.to_string()))
	}
}
