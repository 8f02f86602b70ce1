//! API error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use clim_db::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Store query failed: {0}")]
    Store(#[from] DbError),

    #[error("Query task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Server startup failed: {0}")]
    ServerStartup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::Config(message.into())
    }

    /// Status code reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("[clim-api] request failed: {}", self);
        } else {
            log::warn!("[clim-api] request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_parameter_is_bad_request() {
        let err = ApiError::from(DbError::InvalidParameter("string or blob too big".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failure_is_internal_error() {
        let err = ApiError::from(DbError::ConnectionPoisoned);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::TaskFailed("panicked".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_carries_json_body() {
        let response = ApiError::from(DbError::ConnectionPoisoned).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
