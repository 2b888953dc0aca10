//! Error codes for the QR menu platform
//!
//! Codes are shared by the server and any API client. They are grouped by
//! numeric range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant (restaurant / branch) errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Serialized as a plain `u16` so clients can switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// HTTP method not supported on this endpoint
    MethodNotAllowed = 6,

    // ==================== 1xxx: Auth ====================
    /// No valid session
    NotAuthenticated = 1001,
    /// Unknown email or wrong password
    InvalidCredentials = 1002,
    /// Session idle for longer than the session lifetime
    SessionExpired = 1005,
    /// Account is disabled
    AccountDisabled = 1007,
    /// Too many failed login attempts
    TooManyAttempts = 1008,

    // ==================== 2xxx: Permission ====================
    /// Missing permission token
    PermissionDenied = 2001,
    /// Specific role is required
    RoleRequired = 2002,
    /// Cannot grant or manage a role ranked above the caller
    RoleTooHigh = 2003,

    // ==================== 3xxx: Tenant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// Branch not found
    BranchNotFound = 3002,
    /// Payload targets another tenant
    TenantMismatch = 3003,
    /// Restaurant still owns branches, menu, users or orders
    RestaurantHasDependents = 3004,
    /// Branch still referenced by orders or users
    BranchHasDependents = 3005,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no lines
    OrderEmpty = 4002,
    /// A line references a missing or unavailable menu item
    ItemUnavailable = 4003,
    /// Unknown order status
    InvalidOrderStatus = 4004,
    /// Unknown payment status
    InvalidPaymentStatus = 4005,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu category not found
    CategoryNotFound = 6002,
    /// Price is negative or not a finite number
    InvalidPrice = 6003,
    /// Category still contains items
    CategoryHasItems = 6004,
    /// Menu item is referenced by order lines
    MenuItemInUse = 6005,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered
    EmailExists = 8002,
    /// Unknown role name
    InvalidRole = 8003,
    /// Password shorter than the minimum length
    PasswordTooShort = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Module is not registered
    ModuleNotFound = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default client-facing message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::MethodNotAllowed => "Method not allowed",

            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::TooManyAttempts => "Too many login attempts. Please try again later.",

            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::RoleTooHigh => "Cannot manage a role above your own",

            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::BranchNotFound => "Branch not found",
            ErrorCode::TenantMismatch => "Access to another restaurant is not allowed",
            ErrorCode::RestaurantHasDependents => "Restaurant still has dependent records",
            ErrorCode::BranchHasDependents => "Branch still has dependent records",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::ItemUnavailable => "Menu item not found or unavailable",
            ErrorCode::InvalidOrderStatus => "Invalid order status",
            ErrorCode::InvalidPaymentStatus => "Invalid payment status",

            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::InvalidPrice => "Price must be a non-negative number",
            ErrorCode::CategoryHasItems => "Category still contains menu items",
            ErrorCode::MenuItemInUse => "Menu item is referenced by orders",

            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "User already exists",
            ErrorCode::InvalidRole => "Invalid role",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ModuleNotFound => "Module not found",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::MethodNotAllowed,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1005 => ErrorCode::SessionExpired,
            1007 => ErrorCode::AccountDisabled,
            1008 => ErrorCode::TooManyAttempts,

            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::RoleRequired,
            2003 => ErrorCode::RoleTooHigh,

            3001 => ErrorCode::RestaurantNotFound,
            3002 => ErrorCode::BranchNotFound,
            3003 => ErrorCode::TenantMismatch,
            3004 => ErrorCode::RestaurantHasDependents,
            3005 => ErrorCode::BranchHasDependents,

            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::OrderEmpty,
            4003 => ErrorCode::ItemUnavailable,
            4004 => ErrorCode::InvalidOrderStatus,
            4005 => ErrorCode::InvalidPaymentStatus,

            6001 => ErrorCode::MenuItemNotFound,
            6002 => ErrorCode::CategoryNotFound,
            6003 => ErrorCode::InvalidPrice,
            6004 => ErrorCode::CategoryHasItems,
            6005 => ErrorCode::MenuItemInUse,

            8001 => ErrorCode::UserNotFound,
            8002 => ErrorCode::EmailExists,
            8003 => ErrorCode::InvalidRole,
            8004 => ErrorCode::PasswordTooShort,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9003 => ErrorCode::ConfigError,
            9101 => ErrorCode::ModuleNotFound,

            _ => return Err(InvalidErrorCode(value)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::MethodNotAllowed.code(), 6);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::TooManyAttempts.code(), 1008);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::TenantMismatch.code(), 3003);
        assert_eq!(ErrorCode::ItemUnavailable.code(), 4003);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 6001);
        assert_eq!(ErrorCode::EmailExists.code(), 8002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::ModuleNotFound.code(), 9101);
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::MethodNotAllowed,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::SessionExpired,
            ErrorCode::AccountDisabled,
            ErrorCode::TooManyAttempts,
            ErrorCode::PermissionDenied,
            ErrorCode::RoleRequired,
            ErrorCode::RoleTooHigh,
            ErrorCode::RestaurantNotFound,
            ErrorCode::BranchNotFound,
            ErrorCode::TenantMismatch,
            ErrorCode::RestaurantHasDependents,
            ErrorCode::BranchHasDependents,
            ErrorCode::OrderNotFound,
            ErrorCode::OrderEmpty,
            ErrorCode::ItemUnavailable,
            ErrorCode::InvalidOrderStatus,
            ErrorCode::InvalidPaymentStatus,
            ErrorCode::MenuItemNotFound,
            ErrorCode::CategoryNotFound,
            ErrorCode::InvalidPrice,
            ErrorCode::CategoryHasItems,
            ErrorCode::MenuItemInUse,
            ErrorCode::UserNotFound,
            ErrorCode::EmailExists,
            ErrorCode::InvalidRole,
            ErrorCode::PasswordTooShort,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
            ErrorCode::ModuleNotFound,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ErrorCode::OrderNotFound).unwrap(),
            "4001"
        );
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::InvalidCredentials.message(), "Invalid credentials");
        assert_eq!(
            ErrorCode::ItemUnavailable.message(),
            "Menu item not found or unavailable"
        );
        assert_eq!(ErrorCode::EmailExists.message(), "User already exists");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "4001");
        assert_eq!(format!("{}", InvalidErrorCode(7)), "invalid error code: 7");
    }
}
