// Mapping of service errors onto HTTP responses
use crate::application::error::ServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self);

        let status = match self {
            ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
