use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use sentiment_core::{ScoringError, StoreError};
use serde::Serialize;
use thiserror::Error;

/// Standard HTTP error body: `{"error": ..., "status": "error"}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Carries the underlying reason for logs; clients only see the summary.
    #[error("Database not available")]
    StoreUnavailable(String),

    #[error("Prediction error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Scoring(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Status code plus the JSON error envelope.
    pub fn into_parts(self) -> (StatusCode, serde_json::Value) {
        let status = self.status_code();
        match &self {
            ApiError::StoreUnavailable(reason) => {
                tracing::warn!(reason = %reason, "Request failed: database not available");
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "Request failed");
            }
            _ => {}
        }

        let body = serde_json::to_value(ErrorResponse::new(self.to_string()))
            .unwrap_or_else(|_| serde_json::json!({"error": "internal error", "status": "error"}));
        (status, body)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound("Review not found".to_string()),
            StoreError::Unavailable(reason) => ApiError::StoreUnavailable(reason),
            StoreError::Query(e) => ApiError::Internal(format!("Database error: {}", e)),
            StoreError::CorruptRow(reason) => ApiError::Internal(format!("Database error: {}", reason)),
        }
    }
}

// Extractor rejections (malformed JSON, wrong field types, non-numeric query
// or path values) use the same envelope as handler-level validation.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(format!("Invalid review id: {}", rejection.body_text()))
    }
}
