// crates/api/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nameforge_core::NameforgeError;
use tracing::{error, warn};

/// Maps the error taxonomy onto HTTP statuses and the `{error, details?}`
/// JSON envelope. No partial results are ever returned.
pub struct ApiError(NameforgeError);

impl From<NameforgeError> for ApiError {
    fn from(err: NameforgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self.0 {
            NameforgeError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            NameforgeError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, Some("configuration")),
            NameforgeError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, Some("upstream")),
            NameforgeError::InvalidResponse(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some("invalid_response"))
            }
            NameforgeError::Io(_) | NameforgeError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some("internal"))
            }
        };

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }

        let mut body = serde_json::json!({ "error": self.0.to_string() });
        if let Some(details) = details {
            body["details"] = serde_json::Value::String(details.to_string());
        }

        (status, Json(body)).into_response()
    }
}
