//! Order API Handlers

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{OrderCreate, OrderCreated, OrderDetail, OrderUpdate};

use crate::api::{ApiJson, ApiPath, ApiQuery};
use crate::auth::CurrentUser;
use crate::error::ServiceResult;
use crate::services::orders::{self, OrderQuery};
use crate::state::AppState;

/// GET /api/admin/orders?restaurant_id=&branch_id=&status=
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<OrderQuery>,
) -> ServiceResult<ApiResponse<Vec<OrderDetail>>> {
    let rows = orders::list(&state.pool, &user, &query).await?;
    Ok(ApiResponse::success(rows))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<OrderDetail>> {
    let row = orders::get(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(row))
}

/// POST /api/admin/orders - staff-entered order, same transaction as the public path
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<OrderCreate>,
) -> ServiceResult<ApiResponse<OrderCreated>> {
    let created = orders::create(&state.pool, &state.modules, &user, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "Order placed successfully",
        created,
    ))
}

/// PUT /api/admin/orders/{id} - status and payment status only
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OrderUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    orders::update(&state.pool, &user, id, &payload).await?;
    Ok(ApiResponse::ok_with_message("Order updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    orders::delete(&state.pool, &user, id).await?;
    Ok(ApiResponse::ok_with_message("Order deleted successfully"))
}
