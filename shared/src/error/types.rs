//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Every handler error ends up here before it is rendered, so the client
/// always receives `{ code, message, details }`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error, recording the resource name as a detail
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Card lookup miss; also used for inactive cards so they never leak
    pub fn card_not_found(slug_or_id: impl Into<String>) -> Self {
        Self::new(ErrorCode::CardNotFound).with_detail("card", slug_or_id.into())
    }

    pub fn slug_taken(slug: impl Into<String>) -> Self {
        Self::new(ErrorCode::SlugTaken).with_detail("slug", slug.into())
    }
}

/// Error body returned by every failing handler
///
/// Successful handlers return their payload as plain JSON. `data` is never
/// set by the server; clients may reuse the type for their own envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::CardNotFound);
        assert_eq!(err.code, ErrorCode::CardNotFound);
        assert_eq!(err.message, "Card not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "full_name")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "full_name");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_domain_constructors() {
        let err = AppError::card_not_found("jane-doe");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details.unwrap().get("card").unwrap(), "jane-doe");

        let err = AppError::slug_taken("jane");
        assert_eq!(err.code, ErrorCode::SlugTaken);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);

        let err = AppError::not_found("Education");
        assert_eq!(err.message, "Education not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::SlugInvalid, "bad slug");
        assert_eq!(format!("{}", err), "bad slug");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::card_not_found("abc");
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(4001));
        assert_eq!(response.message, "Card not found");
        assert!(response.data.is_none());
        assert!(response.details.is_some());
    }

    #[test]
    fn test_error_body_omits_empty_fields() {
        let err = AppError::new(ErrorCode::CardNameRequired);
        let json = serde_json::to_string(&ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json, r#"{"code":4004,"message":"Card name is required"}"#);
    }

    #[test]
    fn test_into_response_status_and_body() {
        use axum::response::IntoResponse;

        let response = AppError::slug_taken("jane").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/json"
        );

        let response = AppError::new(ErrorCode::DatabaseError).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
