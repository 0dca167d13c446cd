// HTTP API Error Types
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::StoreError;

/// Every failure surfaces to clients the same way: HTTP 500 with the
/// underlying message. Not-found, constraint and transport errors are not
/// told apart.
#[derive(Debug)]
pub enum ApiError {
    OperationFailed(String),
}

impl ApiError {
    pub fn operation_failed(message: impl Into<String>) -> Self {
        ApiError::OperationFailed(message.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::OperationFailed(_) => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::OperationFailed(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::warn!("Store operation failed: {}", err);
        ApiError::operation_failed(err.to_string())
    }
}

// Body and path rejections would otherwise answer 4xx with plain text
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::operation_failed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!("Rejected path parameter: {}", rejection.body_text());
        ApiError::operation_failed(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
