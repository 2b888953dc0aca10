//! Branch queries

use shared::models::{Branch, BranchCreate, BranchUpdate, Status};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::RepoResult;

const SELECT: &str = r#"
    SELECT b.id, b.restaurant_id, b.name, b.description, b.address, b.phone, b.email,
           b.latitude, b.longitude, b.status, b.created_at, b.updated_at,
           r.name AS restaurant_name
    FROM branches b
    JOIN restaurants r ON r.id = b.restaurant_id
"#;

/// Branches filtered by restaurant and/or branch id; newest first
pub async fn find_all(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    branch_id: Option<i64>,
) -> RepoResult<Vec<Branch>> {
    let sql = format!(
        "{SELECT} WHERE (? IS NULL OR b.restaurant_id = ?) AND (? IS NULL OR b.id = ?) \
         ORDER BY b.created_at DESC, b.id DESC"
    );
    sqlx::query_as::<_, Branch>(&sql)
        .bind(restaurant_id)
        .bind(restaurant_id)
        .bind(branch_id)
        .bind(branch_id)
        .fetch_all(pool)
        .await
}

/// Active branches of one restaurant ordered by name (customer listing)
pub async fn find_active_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Branch>> {
    let sql = format!("{SELECT} WHERE b.restaurant_id = ? AND b.status = ? ORDER BY b.name");
    sqlx::query_as::<_, Branch>(&sql)
        .bind(restaurant_id)
        .bind(Status::Active)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Branch>> {
    let sql = format!("{SELECT} WHERE b.id = ?");
    sqlx::query_as::<_, Branch>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// True when `branch_id` exists under `restaurant_id`
pub async fn belongs_to(pool: &SqlitePool, branch_id: i64, restaurant_id: i64) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM branches WHERE id = ? AND restaurant_id = ?",
    )
    .bind(branch_id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

pub async fn create(pool: &SqlitePool, restaurant_id: i64, data: &BranchCreate) -> RepoResult<i64> {
    let now = now_millis();
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO branches (
            restaurant_id, name, description, address, phone, email,
            latitude, longitude, status, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(restaurant_id)
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(data.address.as_deref().map(str::trim))
    .bind(data.phone.as_deref().map(str::trim))
    .bind(&data.email)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.status.unwrap_or_default())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: &BranchUpdate) -> RepoResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE branches SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            address = COALESCE(?, address),
            phone = COALESCE(?, phone),
            email = COALESCE(?, email),
            latitude = COALESCE(?, latitude),
            longitude = COALESCE(?, longitude),
            status = COALESCE(?, status),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.status)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Orders and users still pointing at the branch
pub async fn count_dependents(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT (SELECT COUNT(*) FROM orders WHERE branch_id = ?)
             + (SELECT COUNT(*) FROM users WHERE branch_id = ?)
        "#,
    )
    .bind(id)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM branches WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
