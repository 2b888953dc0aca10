//! Authentication and access control
//!
//! - [`permissions`]: role to permission-token catalog
//! - [`session`]: session store and the [`CurrentUser`] snapshot
//! - [`service`]: login, logout and session checks
//! - [`scope`]: tenant scoping rules
//! - [`extractor`]: axum extractors for the session token and caller

pub mod extractor;
pub mod permissions;
pub mod scope;
pub mod service;
pub mod session;

pub use extractor::SessionToken;
pub use service::{AuthService, ClientInfo, LoginOutcome};
pub use session::{CurrentUser, Session, SessionStore};
