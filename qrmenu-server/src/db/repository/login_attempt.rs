//! Login attempt log (rate limiting by email)

use sqlx::SqlitePool;

use super::RepoResult;

pub async fn record(
    pool: &SqlitePool,
    email: &str,
    success: bool,
    ip_address: Option<&str>,
    user_agent: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO login_attempts (email, success, ip_address, user_agent, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(email)
    .bind(success)
    .bind(ip_address)
    .bind(user_agent)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Failed attempts for `email` at or after `since`
pub async fn count_failed_since(pool: &SqlitePool, email: &str, since: i64) -> RepoResult<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM login_attempts WHERE email = ? AND success = 0 AND created_at >= ?",
    )
    .bind(email)
    .bind(since)
    .fetch_one(pool)
    .await
}

/// Forget every attempt for `email` (successful login)
pub async fn clear(pool: &SqlitePool, email: &str) -> RepoResult<()> {
    sqlx::query("DELETE FROM login_attempts WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await?;
    Ok(())
}

/// Drop attempts older than `before`; returns how many were removed
pub async fn purge_before(pool: &SqlitePool, before: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM login_attempts WHERE created_at < ?")
        .bind(before)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
