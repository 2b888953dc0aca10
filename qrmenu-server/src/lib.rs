//! QR menu server: multi-tenant restaurant administration
//!
//! # Module layout
//!
//! ```text
//! qrmenu-server/src/
//! ├── config.rs      # environment configuration
//! ├── state.rs       # shared application state
//! ├── error.rs       # service-layer error bridging
//! ├── auth/          # roles, sessions, login, tenant scope, extractors
//! ├── db/            # SQLite pool, migrations, seeding, queries
//! ├── services/      # resource services (CRUD behind permission + scope)
//! ├── orders/        # money arithmetic and the order transaction
//! ├── modules/       # optional modules reacting to order events
//! ├── api/           # axum routers and handlers
//! └── util/          # password hashing, validation
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod modules;
pub mod orders;
pub mod services;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

pub use auth::{AuthService, CurrentUser, SessionStore};
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Security event logging under the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = $value)*
        );
    };
}
