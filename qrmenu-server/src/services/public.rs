//! Customer-facing reads and order placement (no session)

use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Branch, MenuItem, MenuSection, OrderCreate, OrderCreated, OrderDetail, Restaurant, Status,
};
use sqlx::SqlitePool;

use crate::db::repository::{branch, menu, restaurant};
use crate::error::ServiceResult;
use crate::modules::ModuleRegistry;
use crate::orders::{create_order, load_detail};
use crate::util::now_millis;
use crate::util::validation::{MAX_SHORT_TEXT_LEN, require_fields};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuQuery {
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub restaurant_id: Option<i64>,
    pub q: Option<String>,
}

/// What a customer sees after scanning a table code
#[derive(Debug, Clone, Serialize)]
pub struct PublicMenu {
    pub restaurant: Restaurant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
    pub categories: Vec<MenuSection>,
}

pub async fn restaurants(pool: &SqlitePool) -> ServiceResult<Vec<Restaurant>> {
    Ok(restaurant::find_active(pool).await?)
}

pub async fn branches(pool: &SqlitePool, restaurant_id: Option<i64>) -> ServiceResult<Vec<Branch>> {
    let Some(rid) = restaurant_id else {
        return Err(AppError::validation("Restaurant ID required").into());
    };
    Ok(branch::find_active_by_restaurant(pool, rid).await?)
}

/// Active categories with their available items, in display order
pub async fn menu(pool: &SqlitePool, query: &MenuQuery) -> ServiceResult<PublicMenu> {
    let Some(rid) = query.restaurant_id else {
        return Err(AppError::validation("Restaurant ID required").into());
    };
    let restaurant = active_restaurant(pool, rid).await?;
    let branch = match query.branch_id {
        Some(bid) => Some(active_branch(pool, rid, bid).await?),
        None => None,
    };

    let categories = menu::find_active_categories(pool, rid).await?;
    let mut items = menu::find_available_items(pool, rid).await?;
    let sections = categories
        .into_iter()
        .map(|category| {
            let (mine, rest): (Vec<MenuItem>, Vec<MenuItem>) =
                items.drain(..).partition(|i| i.category_id == category.id);
            items = rest;
            MenuSection {
                category,
                items: mine,
            }
        })
        .collect();

    Ok(PublicMenu {
        restaurant,
        branch,
        categories: sections,
    })
}

/// Customer order; any price in the request is ignored
pub async fn place_order(
    pool: &SqlitePool,
    modules: &ModuleRegistry,
    data: &OrderCreate,
) -> ServiceResult<OrderCreated> {
    require_fields(&[
        ("restaurant_id", data.restaurant_id.is_some()),
        ("branch_id", data.branch_id.is_some()),
    ])?;
    let rid = data.restaurant_id.unwrap_or_default();
    let bid = data.branch_id.unwrap_or_default();
    active_restaurant(pool, rid).await?;
    active_branch(pool, rid, bid).await?;
    create_order(pool, modules, rid, bid, data, now_millis()).await
}

pub async fn order(pool: &SqlitePool, id: i64) -> ServiceResult<OrderDetail> {
    load_detail(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).into())
}

pub async fn search(pool: &SqlitePool, query: &SearchQuery) -> ServiceResult<Vec<MenuItem>> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    require_fields(&[
        ("restaurant_id", query.restaurant_id.is_some()),
        ("q", !q.is_empty()),
    ])?;
    if q.len() > MAX_SHORT_TEXT_LEN {
        return Err(AppError::validation("Search query is too long").into());
    }
    Ok(menu::search_items(pool, query.restaurant_id.unwrap_or_default(), q).await?)
}

async fn active_restaurant(pool: &SqlitePool, id: i64) -> ServiceResult<Restaurant> {
    match restaurant::find_by_id(pool, id).await? {
        Some(r) if r.status == Status::Active => Ok(r),
        _ => Err(AppError::new(ErrorCode::RestaurantNotFound).into()),
    }
}

async fn active_branch(pool: &SqlitePool, restaurant_id: i64, id: i64) -> ServiceResult<Branch> {
    match branch::find_by_id(pool, id).await? {
        Some(b) if b.restaurant_id == restaurant_id && b.status == Status::Active => Ok(b),
        _ => Err(AppError::new(ErrorCode::BranchNotFound).into()),
    }
}
