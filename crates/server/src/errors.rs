use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON error response: `{"error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into()))
    }

    pub fn unauthorized() -> Self { Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", None) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.title });
        if let Some(detail) = self.detail {
            body["message"] = serde_json::Value::String(detail);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(m)),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(m)),
            ServiceError::Storage(m) => {
                error!(err = %m, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
            ServiceError::Cancelled => {
                warn!("storage call cancelled");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable", Some(e.to_string()))
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => Self::unauthorized(),
            other => {
                error!(code = other.code(), err = %other, "auth failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("name: cannot be blank".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("character x not found".into()), StatusCode::NOT_FOUND),
            (ServiceError::Storage("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Cancelled, StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn storage_detail_is_not_exposed() {
        let e = JsonApiError::from(ServiceError::Storage("password=hunter2".into()));
        assert!(e.detail.is_none());
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(JsonApiError::from(AuthError::Unauthorized).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::TokenError("x".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
