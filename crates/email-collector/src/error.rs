//! Error types for the collector service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Fixed message returned for any undecodable request body.
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Collector error types.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Request body could not be decoded into the expected shape.
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    /// The store failed to insert a row or to report its id.
    #[error("{0}")]
    Storage(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The optional global request budget is spent.
    #[error("Too many requests")]
    Throttled,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for CollectorError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CollectorError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, INVALID_PAYLOAD.to_string()),
            // Storage errors carry the underlying message to the caller.
            CollectorError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            CollectorError::Throttled => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            CollectorError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<sqlx::Error> for CollectorError {
    fn from(e: sqlx::Error) -> Self {
        CollectorError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for CollectorError {
    fn from(e: std::io::Error) -> Self {
        CollectorError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_payload_hides_decoder_detail() {
        let response = CollectorError::InvalidPayload("expected value at line 1".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Invalid request payload" })
        );
    }

    #[tokio::test]
    async fn test_storage_error_exposes_message() {
        let response = CollectorError::Storage("database is locked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "database is locked" })
        );
    }

    #[tokio::test]
    async fn test_throttled_status() {
        let response = CollectorError::Throttled.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Too many requests" })
        );
    }
}
