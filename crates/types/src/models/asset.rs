//! Collateral collection identifier

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of hex digits in an EVM address, excluding the `0x` prefix
const ADDRESS_HEX_LEN: usize = 40;

/// Validation errors for collection identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetValidationError {
	#[error("Collection address is empty")]
	Empty,

	#[error("Collection address must start with 0x: {value}")]
	MissingPrefix { value: String },

	#[error("Collection address must have {expected} hex digits, got {actual}")]
	InvalidLength { expected: usize, actual: usize },

	#[error("Collection address contains non-hex character '{character}'")]
	InvalidCharacter { character: char },
}

/// Validated address of the NFT collection used as collateral
///
/// Construction trims surrounding whitespace and normalizes the address to
/// lower case, so two identifiers compare equal regardless of checksum casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct AssetIdentifier(String);

impl AssetIdentifier {
	/// Parse and validate a raw collection address
	pub fn parse(raw: &str) -> Result<Self, AssetValidationError> {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Err(AssetValidationError::Empty);
		}

		let digits = trimmed
			.strip_prefix("0x")
			.or_else(|| trimmed.strip_prefix("0X"))
			.ok_or_else(|| AssetValidationError::MissingPrefix {
				value: trimmed.to_string(),
			})?;

		if let Some(character) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
			return Err(AssetValidationError::InvalidCharacter { character });
		}

		if digits.len() != ADDRESS_HEX_LEN {
			return Err(AssetValidationError::InvalidLength {
				expected: ADDRESS_HEX_LEN,
				actual: digits.len(),
			});
		}

		Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl FromStr for AssetIdentifier {
	type Err = AssetValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for AssetIdentifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for AssetIdentifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl<'de> Deserialize<'de> for AssetIdentifier {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		Self::parse(&raw).map_err(serde::de::Error::custom)
	}
}
