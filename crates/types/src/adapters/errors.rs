//! Error types for adapter operations

use thiserror::Error;

use crate::models::ProtocolName;

/// Validation errors for adapter metadata
#[derive(Error, Debug)]
pub enum AdapterValidationError {
	#[error("Invalid adapter ID: {adapter_id}")]
	InvalidAdapterId { adapter_id: String },

	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid version format: {version}")]
	InvalidVersion { version: String },

	#[error("Invalid configuration: {reason}")]
	InvalidConfiguration { reason: String },
}

/// Adapter operation errors
///
/// Every variant is absorbed by the aggregator and downgraded to an empty
/// result for the adapter's protocol.
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("Adapter validation failed: {0}")]
	Validation(#[from] AdapterValidationError),

	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Upstream {protocol} rejected the request: {message}")]
	Upstream {
		protocol: ProtocolName,
		message: String,
	},

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Connection error: {0}")]
	Connection(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Unsupported operation: {operation} for adapter {adapter_id}")]
	UnsupportedOperation {
		operation: String,
		adapter_id: String,
	},
}

impl AdapterError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}
}

/// Errors raised while building the adapter registry at startup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
	#[error("Protocol {protocol} already has a registered adapter")]
	AlreadyRegistered { protocol: ProtocolName },

	#[error("Adapter {adapter_id} has an invalid timeout: {timeout_ms}ms")]
	InvalidTimeout { adapter_id: String, timeout_ms: u64 },

	#[error("Adapter {adapter_id} failed validation: {reason}")]
	InvalidAdapter { adapter_id: String, reason: String },
}
