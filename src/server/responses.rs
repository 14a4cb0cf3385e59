//! JSON envelopes shared by every route.
//!
//! Successful responses carry `"status": "success"` next to their payload,
//! failures carry `"error": <message>`.

use crate::error::LibraryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, warn};

pub fn success_response(fields: Value) -> Response {
    success_response_with_status(StatusCode::OK, fields)
}

pub fn success_response_with_status(status: StatusCode, fields: Value) -> Response {
    let mut body = json!({ "status": "success" });
    if let (Some(body), Value::Object(fields)) = (body.as_object_mut(), fields) {
        body.extend(fields);
    }
    (status, Json(body)).into_response()
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl LibraryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::NotFound(_) | LibraryError::Empty(_) => StatusCode::NOT_FOUND,
            LibraryError::Conflict(_) => StatusCode::CONFLICT,
            LibraryError::OutOfRange { .. } | LibraryError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            LibraryError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LibraryError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            LibraryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        error_response(status, &self.to_string())
    }
}
