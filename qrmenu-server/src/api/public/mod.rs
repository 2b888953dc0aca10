//! Public API: customer menu, search and ordering
//!
//! No session is read on these routes.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(handler::restaurants))
        .route("/branches", get(handler::branches))
        .route("/menu", get(handler::menu))
        .route("/search", get(handler::search))
        .route("/orders", post(handler::place_order))
        .route("/orders/{id}", get(handler::order))
}
