//! Module management API (super_admin)

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/modules", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/enabled", get(handler::enabled))
        .route("/{id}/enable", post(handler::enable))
        .route("/{id}/disable", post(handler::disable))
}
