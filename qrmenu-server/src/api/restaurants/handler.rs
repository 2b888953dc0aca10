//! Restaurant API Handlers

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};

use crate::api::{ApiJson, ApiPath, Created};
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::restaurants;
use crate::state::AppState;

/// GET /api/admin/restaurants
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ServiceResult<ApiResponse<Vec<Restaurant>>> {
    let rows = restaurants::list(&state.pool, &user).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/admin/restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<Restaurant>> {
    let row = restaurants::get(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(row))
}

/// POST /api/admin/restaurants
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<RestaurantCreate>,
) -> ServiceResult<ApiResponse<Created>> {
    let id = restaurants::create(&state.pool, &user, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "Restaurant created successfully",
        Created { id },
    ))
}

/// PUT /api/admin/restaurants/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RestaurantUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    restaurants::update(&state.pool, &user, id, &payload).await?;
    Ok(ApiResponse::ok_with_message("Restaurant updated successfully"))
}

/// DELETE /api/admin/restaurants/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    restaurants::delete(&state.pool, &user, id).await?;
    Ok(ApiResponse::ok_with_message("Restaurant deleted successfully"))
}
