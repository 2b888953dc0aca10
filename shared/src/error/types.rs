//! Error type and the JSON response envelope

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (missing fields, resource name, ...)
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

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Validation error listing every missing field, joined by ", "
    pub fn missing_fields(fields: &[&str]) -> Self {
        let message = fields
            .iter()
            .map(|f| format!("{} is required", f))
            .collect::<Vec<_>>()
            .join(", ");
        Self::with_message(ErrorCode::ValidationFailed, message).with_detail(
            "fields",
            fields.iter().map(|f| Value::from(*f)).collect::<Vec<_>>(),
        )
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Payload references a tenant other than the caller's own
    pub fn tenant_mismatch() -> Self {
        Self::new(ErrorCode::TenantMismatch)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create a method not allowed error
    pub fn method_not_allowed() -> Self {
        Self::new(ErrorCode::MethodNotAllowed)
    }
}

/// Uniform API response envelope
///
/// Every endpoint answers with `{success, data?, message?}`. Failures also
/// carry the numeric `code` and optional `details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            code: None,
            details: None,
        }
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            code: None,
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            code: None,
            details: None,
        }
    }

    /// Success without data but with a message
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            success: false,
            message: Some(err.message.clone()),
            data: None,
            code: Some(err.code.code()),
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            success: false,
            message: Some(err.message),
            data: None,
            code: Some(err.code.code()),
            details: err.details,
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

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match self.code {
            None => StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields").with_detail("field", "email");
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
    }

    #[test]
    fn test_missing_fields_lists_every_field() {
        let err = AppError::missing_fields(&["name", "address", "phone"]);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(
            err.message,
            "name is required, address is required, phone is required"
        );
        let fields = err.details.unwrap();
        assert_eq!(fields["fields"], serde_json::json!(["name", "address", "phone"]));
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::BranchNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::tenant_mismatch().http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 42}));
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Order not found");
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Order not found", "code": 4001})
        );
    }

    #[test]
    fn test_ok_with_message() {
        let json = serde_json::to_value(ApiResponse::ok_with_message("Logged out")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Logged out"})
        );
    }

    #[test]
    fn test_from_error() {
        let response: ApiResponse<String> = AppError::new(ErrorCode::InternalError).into();
        assert!(!response.success);
        assert_eq!(response.code, Some(9001));
        assert_eq!(response.message.as_deref(), Some("Internal server error"));
    }
}
