//! HTTP API
//!
//! # Structure
//!
//! - [`auth`] - login, logout, session checks, staff registration
//! - [`restaurants`], [`branches`], [`menu`], [`users`], [`orders`] - admin resources
//! - [`dashboard`], [`settings`] - admin overview and site settings
//! - [`analytics`] - daily sales report from the analytics module
//! - [`modules`] - module enablement (super_admin)
//! - [`public`] - customer menu and ordering, no session
//!
//! Every response uses the `ApiResponse` envelope, including unknown routes
//! and unsupported methods.

pub mod extract;

pub mod analytics;
pub mod auth;
pub mod branches;
pub mod dashboard;
pub mod menu;
pub mod modules;
pub mod orders;
pub mod public;
pub mod restaurants;
pub mod settings;
pub mod users;

use axum::Router;
use http::{HeaderValue, Method};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::AppState;

pub use extract::{ApiJson, ApiPath, ApiQuery};

/// Body of a create response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Created {
    pub id: i64,
}

/// All API routes, without state
pub fn routes() -> Router<AppState> {
    Router::<AppState>::new()
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(branches::router())
        .merge(menu::router())
        .merge(users::router())
        .merge(orders::router())
        .merge(dashboard::router())
        .merge(analytics::router())
        .merge(settings::router())
        .merge(modules::router())
        .merge(public::router())
}

/// Complete application: routes, envelope fallbacks, tracing and CORS
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    routes()
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found() -> AppError {
    AppError::with_message(ErrorCode::NotFound, "Endpoint not found")
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
