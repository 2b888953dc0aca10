//! Restaurant queries

use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate, Status};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::RepoResult;

const COLUMNS: &str = "id, name, description, logo, address, phone, email, website, status, \
                       created_at, updated_at";

/// All restaurants, or only `restaurant_id` when given; newest first
pub async fn find_all(pool: &SqlitePool, restaurant_id: Option<i64>) -> RepoResult<Vec<Restaurant>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM restaurants WHERE (? IS NULL OR id = ?) \
         ORDER BY created_at DESC, id DESC"
    );
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(restaurant_id)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await
}

/// Active restaurants ordered by name (customer listing)
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let sql = format!("SELECT {COLUMNS} FROM restaurants WHERE status = ? ORDER BY name");
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(Status::Active)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("SELECT {COLUMNS} FROM restaurants WHERE id = ?");
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert; required fields are validated by the caller
pub async fn create(pool: &SqlitePool, data: &RestaurantCreate) -> RepoResult<i64> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO restaurants (
            name, description, logo, address, phone, email, website, status,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(&data.logo)
    .bind(data.address.as_deref().map(str::trim))
    .bind(data.phone.as_deref().map(str::trim))
    .bind(&data.email)
    .bind(&data.website)
    .bind(data.status.unwrap_or_default())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Partial update of the allow-listed columns; false when the row is gone
pub async fn update(pool: &SqlitePool, id: i64, data: &RestaurantUpdate) -> RepoResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE restaurants SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            logo = COALESCE(?, logo),
            address = COALESCE(?, address),
            phone = COALESCE(?, phone),
            email = COALESCE(?, email),
            website = COALESCE(?, website),
            status = COALESCE(?, status),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.logo)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.website)
    .bind(data.status)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Number of rows in other tables that still reference the restaurant
pub async fn count_dependents(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT (SELECT COUNT(*) FROM branches WHERE restaurant_id = ?)
             + (SELECT COUNT(*) FROM menu_categories WHERE restaurant_id = ?)
             + (SELECT COUNT(*) FROM menu_items WHERE restaurant_id = ?)
             + (SELECT COUNT(*) FROM users WHERE restaurant_id = ?)
             + (SELECT COUNT(*) FROM orders WHERE restaurant_id = ?)
        "#,
    )
    .bind(id)
    .bind(id)
    .bind(id)
    .bind(id)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurants WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
