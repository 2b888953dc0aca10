//! Settings API

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/admin/settings",
        get(handler::list).put(handler::update),
    )
}
