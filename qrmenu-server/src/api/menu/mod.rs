//! Menu API: categories and items

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/admin/menu", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/categories/{id}",
            get(handler::get_category)
                .put(handler::update_category)
                .delete(handler::delete_category),
        )
        .route("/items", get(handler::list_items).post(handler::create_item))
        .route(
            "/items/{id}",
            get(handler::get_item)
                .put(handler::update_item)
                .delete(handler::delete_item),
        )
}
