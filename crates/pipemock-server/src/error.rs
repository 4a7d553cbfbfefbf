//! JSON error responses for the admin API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error rendered as `{"error": message}` with the given status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, err: impl ToString) -> Self {
        Self {
            status,
            message: err.to_string(),
        }
    }

    pub fn not_found(err: impl ToString) -> Self {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request(err: impl ToString) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, error = %self.message, "admin request failed");
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
