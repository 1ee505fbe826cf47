use axum::{http::StatusCode, Json};
use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

impl ErrorResponse {
	pub fn new(error: &str, message: impl Into<String>) -> Self {
		Self {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}
	}
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// 400 with the given error code
pub fn bad_request(error: &str, message: impl Into<String>) -> ApiError {
	(StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error, message)))
}
