//! Menu API Handlers

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
};

use crate::api::{ApiJson, ApiPath, ApiQuery, Created};
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::menu::{self, MenuQuery};
use crate::state::AppState;

// ── Categories ──

/// GET /api/admin/menu/categories?restaurant_id=
pub async fn list_categories(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> ServiceResult<ApiResponse<Vec<MenuCategory>>> {
    let rows = menu::list_categories(&state.pool, &user, &query).await?;
    Ok(ApiResponse::success(rows))
}

pub async fn get_category(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<MenuCategory>> {
    let row = menu::get_category(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(row))
}

pub async fn create_category(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<MenuCategoryCreate>,
) -> ServiceResult<ApiResponse<Created>> {
    let id = menu::create_category(&state.pool, &user, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "Category created successfully",
        Created { id },
    ))
}

pub async fn update_category(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<MenuCategoryUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    menu::update_category(&state.pool, &user, id, &payload).await?;
    Ok(ApiResponse::ok_with_message("Category updated successfully"))
}

pub async fn delete_category(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    menu::delete_category(&state.pool, &user, id).await?;
    Ok(ApiResponse::ok_with_message("Category deleted successfully"))
}

// ── Items ──

/// GET /api/admin/menu/items?restaurant_id=&category_id=
pub async fn list_items(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> ServiceResult<ApiResponse<Vec<MenuItem>>> {
    let rows = menu::list_items(&state.pool, &user, &query).await?;
    Ok(ApiResponse::success(rows))
}

pub async fn get_item(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<MenuItem>> {
    let row = menu::get_item(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(row))
}

pub async fn create_item(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<MenuItemCreate>,
) -> ServiceResult<ApiResponse<Created>> {
    let id = menu::create_item(&state.pool, &user, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "Menu item created successfully",
        Created { id },
    ))
}

pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<MenuItemUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    menu::update_item(&state.pool, &user, id, &payload).await?;
    Ok(ApiResponse::ok_with_message("Menu item updated successfully"))
}

pub async fn delete_item(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    menu::delete_item(&state.pool, &user, id).await?;
    Ok(ApiResponse::ok_with_message("Menu item deleted successfully"))
}
