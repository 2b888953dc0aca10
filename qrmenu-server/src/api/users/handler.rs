//! User API Handlers
//!
//! Password hashes never leave the server: `User` skips them on serialize.

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{User, UserCreate, UserUpdate};

use crate::api::{ApiJson, ApiPath, ApiQuery, Created};
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::users::{self, UserQuery};
use crate::state::AppState;

/// GET /api/admin/users?restaurant_id=&branch_id=&role=&status=
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> ServiceResult<ApiResponse<Vec<User>>> {
    let rows = users::list(&state.pool, &user, &query).await?;
    Ok(ApiResponse::success(rows))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<User>> {
    let row = users::get(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(row))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<UserCreate>,
) -> ServiceResult<ApiResponse<Created>> {
    let id = users::create(&state.pool, &user, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "User created successfully",
        Created { id },
    ))
}

pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UserUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    users::update(&state.pool, state.auth.sessions(), &user, id, &payload).await?;
    Ok(ApiResponse::ok_with_message("User updated successfully"))
}

/// DELETE /api/admin/users/{id} - deactivates the account
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    users::delete(&state.pool, state.auth.sessions(), &user, id).await?;
    Ok(ApiResponse::ok_with_message("User deactivated successfully"))
}
