//! Shared types for the QR menu platform
//!
//! Error codes, the JSON response envelope and the domain models used by
//! the server and by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
