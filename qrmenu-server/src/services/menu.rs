//! Menu categories and items
//!
//! Menus belong to a restaurant as a whole; branch pins do not narrow them.

use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
};
use sqlx::SqlitePool;

use super::check_not_blank;
use crate::auth::permissions::{MANAGE_MENU, VIEW_MENU};
use crate::auth::{CurrentUser, scope};
use crate::db::repository::{menu, restaurant};
use crate::error::ServiceResult;
use crate::util::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, present, require_fields, validate_optional_text,
    validate_price,
};

const MAX_SPICY_LEVEL: i64 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuQuery {
    pub restaurant_id: Option<i64>,
    pub category_id: Option<i64>,
}

fn require_read(user: &CurrentUser) -> Result<(), AppError> {
    if user.has_permission(MANAGE_MENU) {
        return Ok(());
    }
    user.require_permission(VIEW_MENU)
}

// ── Categories ──

pub async fn list_categories(
    pool: &SqlitePool,
    user: &CurrentUser,
    query: &MenuQuery,
) -> ServiceResult<Vec<MenuCategory>> {
    require_read(user)?;
    let rid = scope::restaurant_filter(user, query.restaurant_id)?;
    Ok(menu::find_categories(pool, rid).await?)
}

pub async fn get_category(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<MenuCategory> {
    require_read(user)?;
    visible_category(pool, user, id).await
}

pub async fn create_category(
    pool: &SqlitePool,
    user: &CurrentUser,
    data: &MenuCategoryCreate,
) -> ServiceResult<i64> {
    user.require_permission(MANAGE_MENU)?;
    require_fields(&[
        (
            "restaurant_id",
            !user.is_super_admin() || data.restaurant_id.is_some(),
        ),
        ("name", present(&data.name)),
    ])?;
    let restaurant_id = scope::payload_restaurant(user, data.restaurant_id)?;
    ensure_restaurant(pool, restaurant_id).await?;
    check_not_blank(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;

    let id = menu::create_category(pool, restaurant_id, data).await?;
    tracing::info!(category_id = id, restaurant_id, user_id = user.id, "Menu category created");
    Ok(id)
}

pub async fn update_category(
    pool: &SqlitePool,
    user: &CurrentUser,
    id: i64,
    data: &MenuCategoryUpdate,
) -> ServiceResult<()> {
    user.require_permission(MANAGE_MENU)?;
    let current = visible_category(pool, user, id).await?;
    scope::payload_keeps_restaurant(user, Some(current.restaurant_id), data.restaurant_id)?;
    check_not_blank(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;

    if !menu::update_category(pool, id, data).await? {
        return Err(AppError::new(ErrorCode::CategoryNotFound).into());
    }
    tracing::info!(category_id = id, user_id = user.id, "Menu category updated");
    Ok(())
}

pub async fn delete_category(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<()> {
    user.require_permission(MANAGE_MENU)?;
    visible_category(pool, user, id).await?;

    let items = menu::count_items_in_category(pool, id).await?;
    if items > 0 {
        return Err(AppError::new(ErrorCode::CategoryHasItems)
            .with_detail("items", items)
            .into());
    }
    menu::delete_category(pool, id).await?;
    tracing::info!(category_id = id, user_id = user.id, "Menu category deleted");
    Ok(())
}

// ── Items ──

pub async fn list_items(pool: &SqlitePool, user: &CurrentUser, query: &MenuQuery) -> ServiceResult<Vec<MenuItem>> {
    require_read(user)?;
    let rid = scope::restaurant_filter(user, query.restaurant_id)?;
    Ok(menu::find_items(pool, rid, query.category_id).await?)
}

pub async fn get_item(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<MenuItem> {
    require_read(user)?;
    visible_item(pool, user, id).await
}

pub async fn create_item(pool: &SqlitePool, user: &CurrentUser, data: &MenuItemCreate) -> ServiceResult<i64> {
    user.require_permission(MANAGE_MENU)?;
    require_fields(&[
        (
            "restaurant_id",
            !user.is_super_admin() || data.restaurant_id.is_some(),
        ),
        ("category_id", data.category_id.is_some()),
        ("name", present(&data.name)),
        ("price", data.price.is_some()),
    ])?;
    let restaurant_id = scope::payload_restaurant(user, data.restaurant_id)?;
    ensure_restaurant(pool, restaurant_id).await?;

    let price = data.price.unwrap_or_default();
    validate_price(price)?;
    validate_item_text(
        &data.name,
        &data.description,
        &data.image,
        &data.ingredients,
        &data.allergens,
    )?;
    validate_spicy(data.spicy_level)?;

    let category_id = data.category_id.unwrap_or_default();
    ensure_category_in(pool, category_id, restaurant_id).await?;

    let id = menu::create_item(pool, restaurant_id, category_id, price, data).await?;
    tracing::info!(menu_item_id = id, restaurant_id, user_id = user.id, "Menu item created");
    Ok(id)
}

pub async fn update_item(
    pool: &SqlitePool,
    user: &CurrentUser,
    id: i64,
    data: &MenuItemUpdate,
) -> ServiceResult<()> {
    user.require_permission(MANAGE_MENU)?;
    let current = visible_item(pool, user, id).await?;
    scope::payload_keeps_restaurant(user, Some(current.restaurant_id), data.restaurant_id)?;

    if let Some(price) = data.price {
        validate_price(price)?;
    }
    validate_item_text(
        &data.name,
        &data.description,
        &data.image,
        &data.ingredients,
        &data.allergens,
    )?;
    validate_spicy(data.spicy_level)?;
    if let Some(category_id) = data.category_id {
        ensure_category_in(pool, category_id, current.restaurant_id).await?;
    }

    if !menu::update_item(pool, id, data).await? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).into());
    }
    tracing::info!(menu_item_id = id, user_id = user.id, "Menu item updated");
    Ok(())
}

/// Refused once any order line references the item
pub async fn delete_item(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<()> {
    user.require_permission(MANAGE_MENU)?;
    visible_item(pool, user, id).await?;

    let lines = menu::count_order_lines_for_item(pool, id).await?;
    if lines > 0 {
        return Err(AppError::new(ErrorCode::MenuItemInUse)
            .with_detail("order_lines", lines)
            .into());
    }
    menu::delete_item(pool, id).await?;
    tracing::info!(menu_item_id = id, user_id = user.id, "Menu item deleted");
    Ok(())
}

// ── Helpers ──

async fn visible_category(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<MenuCategory> {
    match menu::find_category(pool, id).await? {
        Some(c) if scope::can_see(user, c.restaurant_id, None) => Ok(c),
        _ => Err(AppError::new(ErrorCode::CategoryNotFound).into()),
    }
}

async fn visible_item(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<MenuItem> {
    match menu::find_item(pool, id).await? {
        Some(i) if scope::can_see(user, i.restaurant_id, None) => Ok(i),
        _ => Err(AppError::new(ErrorCode::MenuItemNotFound).into()),
    }
}

async fn ensure_restaurant(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    if restaurant::find_by_id(pool, id).await?.is_none() {
        return Err(AppError::new(ErrorCode::RestaurantNotFound).into());
    }
    Ok(())
}

/// A category from another restaurant reads as missing
async fn ensure_category_in(pool: &SqlitePool, category_id: i64, restaurant_id: i64) -> ServiceResult<()> {
    match menu::find_category(pool, category_id).await? {
        Some(c) if c.restaurant_id == restaurant_id => Ok(()),
        _ => Err(AppError::new(ErrorCode::CategoryNotFound).into()),
    }
}

fn validate_item_text(
    name: &Option<String>,
    description: &Option<String>,
    image: &Option<String>,
    ingredients: &Option<String>,
    allergens: &Option<String>,
) -> Result<(), AppError> {
    check_not_blank(name, "name", MAX_NAME_LEN)?;
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(image, "image", MAX_URL_LEN)?;
    validate_optional_text(ingredients, "ingredients", MAX_NOTE_LEN)?;
    validate_optional_text(allergens, "allergens", MAX_NOTE_LEN)?;
    Ok(())
}

fn validate_spicy(level: Option<i64>) -> Result<(), AppError> {
    match level {
        Some(l) if !(0..=MAX_SPICY_LEVEL).contains(&l) => Err(AppError::validation(format!(
            "spicy_level must be between 0 and {MAX_SPICY_LEVEL}"
        ))),
        _ => Ok(()),
    }
}
