//! Mapping of crate errors onto HTTP responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::error::{Error, UpstreamError, ValidationError};

/// Error returned by handlers.
///
/// | variant | status |
/// |---|---|
/// | `BadRequest` | 400 |
/// | `Upstream` (credentials missing) | 503 |
/// | `Upstream` (anything else) | 502 |
/// | `Internal` | 500 |
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(UpstreamError),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(e) => Self::BadRequest(e.to_string()),
            Error::Domain(e) => Self::BadRequest(e.to_string()),
            Error::Upstream(e) => Self::Upstream(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self::Upstream(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid JSON payload: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Upstream(err) => {
                warn!(
                    error = %err,
                    endpoint = err.endpoint().unwrap_or("-"),
                    "Marketplace call failed"
                );
                let status = if matches!(err, UpstreamError::MissingCredentials) {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, err.to_string())
            }
            Self::Internal(message) => {
                error!(error = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError = Error::from(ValidationError::MissingField("price")).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_maps_to_bad_gateway() {
        let err: ApiError = UpstreamError::Transport {
            endpoint: "/sapi/v1/c2c/ads/search".into(),
            reason: "connection refused".into(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_credentials_is_unavailable() {
        let err: ApiError = UpstreamError::MissingCredentials.into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
