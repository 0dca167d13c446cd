use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

/// `{ "success": true }` acknowledgment returned by update and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn success() -> Self {
        Self { success: true }
    }
}

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub type ApiResult<T> = Result<T, crate::error::ApiError>;
