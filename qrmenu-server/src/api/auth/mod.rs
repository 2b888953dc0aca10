//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

/// - /api/auth/login, /api/auth/logout, /api/auth/check: no session required
/// - /api/auth/user, /api/auth/register: session required (extractor)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/check", get(handler::check))
        .route("/api/auth/user", get(handler::user))
        .route("/api/auth/register", post(handler::register))
}
