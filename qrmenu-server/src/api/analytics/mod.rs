//! Analytics API

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/admin/analytics/daily", get(handler::daily_report))
}
