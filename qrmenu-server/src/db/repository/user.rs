//! User queries

use shared::models::{Role, Status, User, UserUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::RepoResult;

const COLUMNS: &str = "id, email, password_hash, name, phone, role, restaurant_id, branch_id, \
                       status, last_login, created_at, updated_at";

/// Validated insert payload (email normalised, password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub role: Role,
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
}

/// Listing filters; `None` means unfiltered
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub role: Option<Role>,
    pub status: Option<Status>,
}

pub async fn find_all(pool: &SqlitePool, filter: &UserFilter) -> RepoResult<Vec<User>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM users \
         WHERE (? IS NULL OR restaurant_id = ?) AND (? IS NULL OR branch_id = ?) \
           AND (? IS NULL OR role = ?) AND (? IS NULL OR status = ?) \
         ORDER BY created_at DESC, id DESC"
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(filter.restaurant_id)
        .bind(filter.restaurant_id)
        .bind(filter.branch_id)
        .bind(filter.branch_id)
        .bind(filter.role)
        .bind(filter.role)
        .bind(filter.status)
        .bind(filter.status)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Active user by normalised email (login lookup)
pub async fn find_active_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE email = ? AND status = ?");
    sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .bind(Status::Active)
        .fetch_optional(pool)
        .await
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn create(pool: &SqlitePool, user: &NewUser<'_>) -> RepoResult<i64> {
    let now = now_millis();
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (
            email, password_hash, name, phone, role, restaurant_id, branch_id,
            status, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.name)
    .bind(user.phone)
    .bind(user.role)
    .bind(user.restaurant_id)
    .bind(user.branch_id)
    .bind(Status::Active)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Partial update; `role` and `password_hash` are resolved by the caller
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &UserUpdate,
    role: Option<Role>,
    password_hash: Option<&str>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE users SET
            name = COALESCE(?, name),
            phone = COALESCE(?, phone),
            password_hash = COALESCE(?, password_hash),
            role = COALESCE(?, role),
            branch_id = COALESCE(?, branch_id),
            status = COALESCE(?, status),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(password_hash)
    .bind(role)
    .bind(data.branch_id)
    .bind(data.status)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: Status) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE users SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn touch_last_login(pool: &SqlitePool, id: i64, now: i64) -> RepoResult<()> {
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
