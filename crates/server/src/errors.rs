use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ApiResponse;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const ACCOUNT_NOT_FOUND: &str = "Account not found";
pub const EXTERNAL_FAILED: &str = "Error fetching external data";

/// Error envelope returned by every `/api` handler:
/// `{"success": false, "message": ..., "error"?: ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error: Option<String>) -> Self {
        Self { status, message: message.into(), error }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ACCOUNT_NOT_FOUND, None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, error = ?self.error, "request failed");
        }
        let body = ApiResponse::failure(self.message, self.error);
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg, None),
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Upstream(core) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, EXTERNAL_FAILED, Some(core.to_string()))
            }
        }
    }
}

// 请求体不是合法 JSON 或字段类型不符（例如 balance 为字符串）时统一返回 400
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body", Some(rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use common::CoreError;

    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let e = JsonApiError::from(ServiceError::Validation("Please provide name, balance, and email".into()));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Please provide name, balance, and email");

        let e = JsonApiError::from(ServiceError::not_found("account"));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, ACCOUNT_NOT_FOUND);
        assert!(e.error.is_none());

        let e = JsonApiError::from(ServiceError::Upstream(CoreError::Status(502)));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, EXTERNAL_FAILED);
        assert!(e.error.unwrap().contains("502"));
    }
}
