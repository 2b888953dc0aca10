//! Branch API Handlers

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{Branch, BranchCreate, BranchUpdate};

use crate::api::{ApiJson, ApiPath, ApiQuery, Created};
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::branches::{self, BranchQuery};
use crate::state::AppState;

/// GET /api/admin/branches?restaurant_id=
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<BranchQuery>,
) -> ServiceResult<ApiResponse<Vec<Branch>>> {
    let rows = branches::list(&state.pool, &user, &query).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/admin/branches/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<Branch>> {
    let row = branches::get(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(row))
}

/// POST /api/admin/branches
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<BranchCreate>,
) -> ServiceResult<ApiResponse<Created>> {
    let id = branches::create(&state.pool, &user, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "Branch created successfully",
        Created { id },
    ))
}

/// PUT /api/admin/branches/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<BranchUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    branches::update(&state.pool, &user, id, &payload).await?;
    Ok(ApiResponse::ok_with_message("Branch updated successfully"))
}

/// DELETE /api/admin/branches/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    branches::delete(&state.pool, &user, id).await?;
    Ok(ApiResponse::ok_with_message("Branch deleted successfully"))
}
