//! Settings API Handlers

use std::collections::{BTreeMap, HashMap};

use axum::extract::State;
use serde_json::Value;
use shared::error::ApiResponse;

use crate::api::ApiJson;
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::settings;
use crate::state::AppState;

/// GET /api/admin/settings
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ServiceResult<ApiResponse<BTreeMap<String, String>>> {
    let values = settings::list(&state.pool).await?;
    Ok(ApiResponse::success(values))
}

/// PUT /api/admin/settings - super_admin only
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<HashMap<String, Value>>,
) -> ServiceResult<ApiResponse<()>> {
    let count = settings::update(&state.pool, &user, &payload).await?;
    tracing::info!(user_id = user.id, count, "Settings updated");
    Ok(ApiResponse::ok_with_message("Settings updated successfully"))
}
