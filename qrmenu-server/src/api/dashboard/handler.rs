//! Dashboard API Handlers

use axum::extract::State;
use shared::error::ApiResponse;

use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::dashboard::{self, DashboardStats};
use crate::state::AppState;
use crate::util::now_millis;

/// GET /api/admin/dashboard - statistics within the caller's scope
pub async fn stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ServiceResult<ApiResponse<DashboardStats>> {
    let stats = dashboard::stats(&state.pool, &user, now_millis()).await?;
    Ok(ApiResponse::success(stats))
}
