//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found (out-of-scope rows are reported the same way)
            Self::NotFound
            | Self::RestaurantNotFound
            | Self::BranchNotFound
            | Self::OrderNotFound
            | Self::ItemUnavailable
            | Self::MenuItemNotFound
            | Self::CategoryNotFound
            | Self::UserNotFound
            | Self::ModuleNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmailExists
            | Self::RestaurantHasDependents
            | Self::BranchHasDependents
            | Self::CategoryHasItems
            | Self::MenuItemInUse => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::SessionExpired
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::RoleTooHigh
            | Self::TenantMismatch => StatusCode::FORBIDDEN,

            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            Self::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and malformed input)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::InvalidOrderStatus
            | Self::InvalidPaymentStatus
            | Self::InvalidPrice
            | Self::InvalidRole
            | Self::PasswordTooShort => StatusCode::BAD_REQUEST,
        }
    }
}
