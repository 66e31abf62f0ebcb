//! API error responses
//!
//! Every failure is returned as `{"error": message}` with a matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error type for HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl From<hue_common::Error> for ApiError {
    fn from(e: hue_common::Error) -> Self {
        use hue_common::Error;
        match e {
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            other if other.is_persistence() => {
                error!("Storage failure: {}", other);
                ApiError::Internal(format!("Storage unavailable: {}", other))
            }
            other => {
                error!("Request failed: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hue_common::Error;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (Error::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (Error::Persistence("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Config("oops".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_storage_failures_are_labelled() {
        match ApiError::from(Error::Persistence("disk full".into())) {
            ApiError::Internal(msg) => assert!(msg.starts_with("Storage unavailable")),
            other => panic!("unexpected {:?}", other),
        }
        match ApiError::from(Error::Config("bad port".into())) {
            ApiError::Internal(msg) => assert!(!msg.starts_with("Storage unavailable")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
