//! Aggregate queries behind the dashboard

use serde::Serialize;
use sqlx::SqlitePool;

use super::RepoResult;

/// Order count and revenue over a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct OrderTotals {
    pub orders: i64,
    pub revenue: f64,
}

/// Menu item ranked by quantity ordered
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PopularItem {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Orders created at or after `since` (cancelled orders excluded from revenue)
pub async fn totals_since(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    branch_id: Option<i64>,
    since: i64,
) -> RepoResult<OrderTotals> {
    sqlx::query_as::<_, OrderTotals>(
        r#"
        SELECT COUNT(*) AS orders,
               COALESCE(SUM(CASE WHEN status != 'cancelled' THEN total_amount ELSE 0.0 END), 0.0)
                   AS revenue
        FROM orders
        WHERE (? IS NULL OR restaurant_id = ?)
          AND (? IS NULL OR branch_id = ?)
          AND created_at >= ?
        "#,
    )
    .bind(restaurant_id)
    .bind(restaurant_id)
    .bind(branch_id)
    .bind(branch_id)
    .bind(since)
    .fetch_one(pool)
    .await
}

pub async fn popular_items(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    branch_id: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<PopularItem>> {
    sqlx::query_as::<_, PopularItem>(
        r#"
        SELECT mi.id AS menu_item_id, mi.name AS name,
               SUM(oi.quantity) AS quantity, SUM(oi.total_price) AS revenue
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        JOIN menu_items mi ON mi.id = oi.menu_item_id
        WHERE (? IS NULL OR o.restaurant_id = ?)
          AND (? IS NULL OR o.branch_id = ?)
          AND o.status != 'cancelled'
        GROUP BY mi.id, mi.name
        ORDER BY quantity DESC, mi.name
        LIMIT ?
        "#,
    )
    .bind(restaurant_id)
    .bind(restaurant_id)
    .bind(branch_id)
    .bind(branch_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
