//! Protocol-agnostic lending offer

use serde::{Deserialize, Serialize};

use super::ProtocolName;

/// One lending pool or loan offer, normalized by the adapter that produced it
///
/// Amounts are decimal strings in the smallest unit of `currency` so that
/// 256-bit on-chain values survive serialization unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOffer {
	/// Protocol that published the offer
	pub protocol: ProtocolName,
	/// Pool contract (or offer id for peer-to-peer protocols)
	pub pool_address: String,
	/// Collateral collection the offer accepts
	pub collection: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub symbol: Option<String>,
	/// Loan-to-value ratio in the range `0.0..=1.0`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ltv: Option<f64>,
	/// Annual interest rate as a fraction (0.12 == 12% APR)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub annual_interest: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_loan_duration_secs: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_nfts_to_borrow: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub available_liquidity: Option<String>,
	/// Loan currency symbol, e.g. `ETH` or `WETH`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<String>,
}

impl NormalizedOffer {
	/// Create an offer with only the identifying fields set
	pub fn new(
		protocol: ProtocolName,
		pool_address: impl Into<String>,
		collection: impl Into<String>,
	) -> Self {
		Self {
			protocol,
			pool_address: pool_address.into(),
			collection: collection.into(),
			name: None,
			symbol: None,
			ltv: None,
			annual_interest: None,
			max_loan_duration_secs: None,
			max_nfts_to_borrow: None,
			available_liquidity: None,
			currency: None,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_terms(mut self, ltv: f64, annual_interest: f64) -> Self {
		self.ltv = Some(ltv);
		self.annual_interest = Some(annual_interest);
		self
	}

	pub fn with_max_loan_duration_secs(mut self, secs: u64) -> Self {
		self.max_loan_duration_secs = Some(secs);
		self
	}

	pub fn with_liquidity(mut self, amount: impl Into<String>, currency: impl Into<String>) -> Self {
		self.available_liquidity = Some(amount.into());
		self.currency = Some(currency.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_serializes_camel_case_and_skips_missing_terms() {
		let offer = NormalizedOffer::new(
			ProtocolName::BendDao,
			"0x70b97a0da65c15dfb0ffa02aee6fa36e507c2762",
			"0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d",
		)
		.with_terms(0.4, 0.18);

		let json = serde_json::to_value(&offer).unwrap();
		assert_eq!(json["protocol"], "bendDao");
		assert_eq!(json["poolAddress"], "0x70b97a0da65c15dfb0ffa02aee6fa36e507c2762");
		assert_eq!(json["ltv"], 0.4);
		assert_eq!(json["annualInterest"], 0.18);
		assert!(json.get("maxLoanDurationSecs").is_none());
		assert!(json.get("currency").is_none());
	}

	#[test]
	fn test_deserializes_minimal_record() {
		let offer: NormalizedOffer = serde_json::from_str(
			r#"{"protocol":"nftfi","poolAddress":"offer-17","collection":"0xabc"}"#,
		)
		.unwrap();
		assert_eq!(offer, NormalizedOffer::new(ProtocolName::Nftfi, "offer-17", "0xabc"));
	}
}
