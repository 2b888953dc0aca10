//! Error system shared by the server and its clients
//!
//! - [`ErrorCode`]: numeric error codes, grouped by range
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`AppError`]: error with code, message and details
//! - [`ApiResponse`]: the `{success, data?, message?}` envelope
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::NotFound);
//! let err = AppError::missing_fields(&["name", "phone"]);
//! let response = ApiResponse::<()>::error(&err);
//! assert!(!response.success);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
