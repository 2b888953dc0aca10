//! Loyalty points ledger (built-in loyalty module)

use sqlx::SqlitePool;

use super::RepoResult;

/// Balance of one customer
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LoyaltyAccount {
    pub email: String,
    pub points_balance: i64,
    pub total_earned: i64,
    pub total_spent: f64,
    pub updated_at: i64,
}

/// Credit `points` and add `spent` to the customer's account, creating it if needed
pub async fn credit(pool: &SqlitePool, email: &str, points: i64, spent: f64, now: i64) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO loyalty_accounts (email, points_balance, total_earned, total_spent, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(email) DO UPDATE SET
            points_balance = points_balance + excluded.points_balance,
            total_earned = total_earned + excluded.total_earned,
            total_spent = total_spent + excluded.total_spent,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(email)
    .bind(points)
    .bind(points)
    .bind(spent)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find(pool: &SqlitePool, email: &str) -> RepoResult<Option<LoyaltyAccount>> {
    sqlx::query_as::<_, LoyaltyAccount>(
        "SELECT email, points_balance, total_earned, total_spent, updated_at \
         FROM loyalty_accounts WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}
