//! Menu category and item queries

use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate,
    MenuItemUpdate, Status,
};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;

const CATEGORY_COLUMNS: &str =
    "id, restaurant_id, name, description, image, display_order, status, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, restaurant_id, category_id, name, description, price, image, \
     ingredients, allergens, spicy_level, vegetarian, vegan, gluten_free, available, featured, \
     display_order, created_at, updated_at";

// ── Categories ──

pub async fn find_categories(pool: &SqlitePool, restaurant_id: Option<i64>) -> RepoResult<Vec<MenuCategory>> {
    let sql = format!(
        "SELECT {CATEGORY_COLUMNS} FROM menu_categories WHERE (? IS NULL OR restaurant_id = ?) \
         ORDER BY display_order, name"
    );
    sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(restaurant_id)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await
}

pub async fn find_active_categories(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<MenuCategory>> {
    let sql = format!(
        "SELECT {CATEGORY_COLUMNS} FROM menu_categories WHERE restaurant_id = ? AND status = ? \
         ORDER BY display_order, name"
    );
    sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(restaurant_id)
        .bind(Status::Active)
        .fetch_all(pool)
        .await
}

pub async fn find_category(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuCategory>> {
    let sql = format!("SELECT {CATEGORY_COLUMNS} FROM menu_categories WHERE id = ?");
    sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_category(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: &MenuCategoryCreate,
) -> RepoResult<i64> {
    let now = now_millis();
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO menu_categories (
            restaurant_id, name, description, image, display_order, status, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(restaurant_id)
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.display_order.unwrap_or(0))
    .bind(data.status.unwrap_or_default())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update_category(pool: &SqlitePool, id: i64, data: &MenuCategoryUpdate) -> RepoResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE menu_categories SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            image = COALESCE(?, image),
            display_order = COALESCE(?, display_order),
            status = COALESCE(?, status),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.display_order)
    .bind(data.status)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn count_items_in_category(pool: &SqlitePool, category_id: i64) -> RepoResult<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items WHERE category_id = ?")
        .bind(category_id)
        .fetch_one(pool)
        .await
}

pub async fn delete_category(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Items ──

pub async fn find_items(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    category_id: Option<i64>,
) -> RepoResult<Vec<MenuItem>> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM menu_items \
         WHERE (? IS NULL OR restaurant_id = ?) AND (? IS NULL OR category_id = ?) \
         ORDER BY display_order, name"
    );
    sqlx::query_as::<_, MenuItem>(&sql)
        .bind(restaurant_id)
        .bind(restaurant_id)
        .bind(category_id)
        .bind(category_id)
        .fetch_all(pool)
        .await
}

/// Available items of a restaurant, for the customer menu
pub async fn find_available_items(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<MenuItem>> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM menu_items WHERE restaurant_id = ? AND available = 1 \
         ORDER BY display_order, name"
    );
    sqlx::query_as::<_, MenuItem>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await
}

/// Free-text search over name, description and ingredients of available items
pub async fn search_items(pool: &SqlitePool, restaurant_id: i64, query: &str) -> RepoResult<Vec<MenuItem>> {
    let pattern = format!("%{}%", escape_like(query));
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM menu_items \
         WHERE restaurant_id = ? AND available = 1 \
           AND (name LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\' \
                OR ingredients LIKE ? ESCAPE '\\') \
         ORDER BY name"
    );
    sqlx::query_as::<_, MenuItem>(&sql)
        .bind(restaurant_id)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(pool)
        .await
}

/// Escape LIKE wildcards so the query matches literally
fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub async fn find_item(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM menu_items WHERE id = ?");
    sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Available item of the given restaurant, read on the order transaction's connection
pub async fn find_orderable_item(
    conn: &mut SqliteConnection,
    id: i64,
    restaurant_id: i64,
) -> RepoResult<Option<MenuItem>> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM menu_items WHERE id = ? AND restaurant_id = ? AND available = 1"
    );
    sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(conn)
        .await
}

pub async fn create_item(
    pool: &SqlitePool,
    restaurant_id: i64,
    category_id: i64,
    price: f64,
    data: &MenuItemCreate,
) -> RepoResult<i64> {
    let now = now_millis();
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO menu_items (
            restaurant_id, category_id, name, description, price, image, ingredients,
            allergens, spicy_level, vegetarian, vegan, gluten_free, available, featured,
            display_order, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(restaurant_id)
    .bind(category_id)
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(price)
    .bind(&data.image)
    .bind(&data.ingredients)
    .bind(&data.allergens)
    .bind(data.spicy_level.unwrap_or(0))
    .bind(data.vegetarian.unwrap_or(false))
    .bind(data.vegan.unwrap_or(false))
    .bind(data.gluten_free.unwrap_or(false))
    .bind(data.available.unwrap_or(true))
    .bind(data.featured.unwrap_or(false))
    .bind(data.display_order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update_item(pool: &SqlitePool, id: i64, data: &MenuItemUpdate) -> RepoResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE menu_items SET
            category_id = COALESCE(?, category_id),
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            price = COALESCE(?, price),
            image = COALESCE(?, image),
            ingredients = COALESCE(?, ingredients),
            allergens = COALESCE(?, allergens),
            spicy_level = COALESCE(?, spicy_level),
            vegetarian = COALESCE(?, vegetarian),
            vegan = COALESCE(?, vegan),
            gluten_free = COALESCE(?, gluten_free),
            available = COALESCE(?, available),
            featured = COALESCE(?, featured),
            display_order = COALESCE(?, display_order),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image)
    .bind(&data.ingredients)
    .bind(&data.allergens)
    .bind(data.spicy_level)
    .bind(data.vegetarian)
    .bind(data.vegan)
    .bind(data.gluten_free)
    .bind(data.available)
    .bind(data.featured)
    .bind(data.display_order)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn count_order_lines_for_item(pool: &SqlitePool, item_id: i64) -> RepoResult<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE menu_item_id = ?")
        .bind(item_id)
        .fetch_one(pool)
        .await
}

pub async fn delete_item(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
