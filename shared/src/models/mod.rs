//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix
//! milliseconds.

pub mod branch;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod role;
pub mod setting;
pub mod status;
pub mod user;

// Re-exports
pub use branch::*;
pub use menu::*;
pub use order::*;
pub use restaurant::*;
pub use role::*;
pub use setting::*;
pub use status::*;
pub use user::*;
