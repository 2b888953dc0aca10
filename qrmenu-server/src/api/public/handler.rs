//! Public API Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::{Branch, MenuItem, OrderCreate, OrderCreated, OrderDetail, Restaurant};

use crate::api::{ApiJson, ApiPath, ApiQuery};
use crate::error::ServiceResult;
use crate::services::public::{self, MenuQuery, PublicMenu, SearchQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BranchQuery {
    pub restaurant_id: Option<i64>,
}

/// GET /api/public/restaurants
pub async fn restaurants(State(state): State<AppState>) -> ServiceResult<ApiResponse<Vec<Restaurant>>> {
    Ok(ApiResponse::success(public::restaurants(&state.pool).await?))
}

/// GET /api/public/branches?restaurant_id=
pub async fn branches(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BranchQuery>,
) -> ServiceResult<ApiResponse<Vec<Branch>>> {
    let rows = public::branches(&state.pool, query.restaurant_id).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/public/menu?restaurant_id=&branch_id=
pub async fn menu(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> ServiceResult<ApiResponse<PublicMenu>> {
    Ok(ApiResponse::success(public::menu(&state.pool, &query).await?))
}

/// GET /api/public/search?restaurant_id=&q=
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ServiceResult<ApiResponse<Vec<MenuItem>>> {
    Ok(ApiResponse::success(public::search(&state.pool, &query).await?))
}

/// POST /api/public/orders - any client-side price is ignored
pub async fn place_order(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<OrderCreate>,
) -> ServiceResult<ApiResponse<OrderCreated>> {
    let created = public::place_order(&state.pool, &state.modules, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "Order placed successfully",
        created,
    ))
}

/// GET /api/public/orders/{id}
pub async fn order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<OrderDetail>> {
    Ok(ApiResponse::success(public::order(&state.pool, id).await?))
}
