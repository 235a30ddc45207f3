//! HTTP error mapping.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use orgman_core::error::OrgError;
use serde_json::json;
use tracing::error;

/// Wrapper turning domain errors into HTTP responses.
///
/// The body is always `{"detail": <message>}` with the error's display
/// string; internal errors are logged and replaced with a generic
/// message.
pub struct ApiError(pub OrgError);

impl From<OrgError> for ApiError {
    fn from(err: OrgError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            OrgError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            OrgError::AlreadyExists { .. } | OrgError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            OrgError::Forbidden { .. } => (StatusCode::FORBIDDEN, self.0.to_string()),
            OrgError::Unauthorized { .. } | OrgError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, self.0.to_string())
            }
            OrgError::Database(msg) | OrgError::Crypto(msg) => {
                error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
