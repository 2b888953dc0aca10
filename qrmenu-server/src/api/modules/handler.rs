//! Module API Handlers

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::Role;

use crate::api::ApiPath;
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::modules::ModuleInfo;
use crate::state::AppState;

/// GET /api/modules - every registered module with its flag
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ServiceResult<ApiResponse<Vec<ModuleInfo>>> {
    user.require_role(Role::SuperAdmin)?;
    Ok(ApiResponse::success(state.modules.list()))
}

/// GET /api/modules/enabled
pub async fn enabled(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ServiceResult<ApiResponse<Vec<String>>> {
    user.require_role(Role::SuperAdmin)?;
    Ok(ApiResponse::success(state.modules.enabled_ids()))
}

/// POST /api/modules/{id}/enable
pub async fn enable(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<String>,
) -> ServiceResult<ApiResponse<()>> {
    user.require_role(Role::SuperAdmin)?;
    state.modules.enable(&id).await?;
    Ok(ApiResponse::ok_with_message(format!("Module '{id}' enabled")))
}

/// POST /api/modules/{id}/disable
pub async fn disable(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<String>,
) -> ServiceResult<ApiResponse<()>> {
    user.require_role(Role::SuperAdmin)?;
    state.modules.disable(&id).await?;
    Ok(ApiResponse::ok_with_message(format!("Module '{id}' disabled")))
}
