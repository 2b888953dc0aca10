//! Site settings queries

use shared::models::Setting;
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Setting>> {
    sqlx::query_as::<_, Setting>("SELECT key, value, description FROM settings ORDER BY key")
        .fetch_all(pool)
        .await
}

/// Insert or replace the value, keeping an existing description
pub async fn upsert(pool: &SqlitePool, key: &str, value: &str, description: Option<&str>) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, description) VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            description = COALESCE(excluded.description, settings.description)
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(description)
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert only when the key is absent (seeding)
pub async fn insert_default(pool: &SqlitePool, key: &str, value: &str, description: &str) -> RepoResult<()> {
    sqlx::query("INSERT OR IGNORE INTO settings (key, value, description) VALUES (?, ?, ?)")
        .bind(key)
        .bind(value)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn find_value(pool: &SqlitePool, key: &str) -> RepoResult<Option<String>> {
    sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}
