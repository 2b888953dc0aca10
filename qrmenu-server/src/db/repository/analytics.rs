//! Sales aggregates written by the analytics module

use serde::Serialize;
use sqlx::SqlitePool;

use super::RepoResult;

/// One order as the analytics tables see it
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFact {
    pub order_id: i64,
    pub restaurant_id: i64,
    pub branch_id: i64,
    pub total_amount: f64,
    /// Number of order lines
    pub item_count: i64,
    pub customer_type: &'static str,
    pub order_day: i64,
    pub order_hour: i64,
    pub created_at: i64,
}

/// Quantity and revenue of one menu item within an order
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFact {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub revenue: f64,
}

/// Order count, revenue and average order value over one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct SalesSummary {
    pub total_orders: i64,
    pub total_revenue: f64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct HourlySales {
    pub hour: i64,
    pub orders: i64,
    pub revenue: f64,
}

/// Running totals of a menu item
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ItemPerformance {
    pub menu_item_id: i64,
    pub name: String,
    pub order_count: i64,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

/// Record an order and fold its items into the running totals
///
/// Returns `false` without touching the item totals when the order was
/// already recorded.
pub async fn record(pool: &SqlitePool, fact: &OrderFact, items: &[ItemFact]) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        r#"
        INSERT INTO analytics_orders
            (order_id, restaurant_id, branch_id, total_amount, item_count,
             customer_type, order_day, order_hour, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(order_id) DO NOTHING
        "#,
    )
    .bind(fact.order_id)
    .bind(fact.restaurant_id)
    .bind(fact.branch_id)
    .bind(fact.total_amount)
    .bind(fact.item_count)
    .bind(fact.customer_type)
    .bind(fact.order_day)
    .bind(fact.order_hour)
    .bind(fact.created_at)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(false);
    }

    for item in items {
        sqlx::query(
            r#"
            INSERT INTO analytics_menu_items
                (restaurant_id, branch_id, menu_item_id, order_count,
                 total_quantity, total_revenue, last_ordered)
            VALUES (?, ?, ?, 1, ?, ?, ?)
            ON CONFLICT(restaurant_id, branch_id, menu_item_id) DO UPDATE SET
                order_count = order_count + 1,
                total_quantity = total_quantity + excluded.total_quantity,
                total_revenue = total_revenue + excluded.total_revenue,
                last_ordered = MAX(last_ordered, excluded.last_ordered)
            "#,
        )
        .bind(fact.restaurant_id)
        .bind(fact.branch_id)
        .bind(item.menu_item_id)
        .bind(item.quantity)
        .bind(item.revenue)
        .bind(fact.created_at)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(true)
}

pub async fn sales_on_day(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    branch_id: Option<i64>,
    day: i64,
) -> RepoResult<SalesSummary> {
    sqlx::query_as::<_, SalesSummary>(
        r#"
        SELECT COUNT(*) AS total_orders,
               COALESCE(SUM(total_amount), 0.0) AS total_revenue,
               COALESCE(AVG(total_amount), 0.0) AS avg_order_value
        FROM analytics_orders
        WHERE (? IS NULL OR restaurant_id = ?)
          AND (? IS NULL OR branch_id = ?)
          AND order_day = ?
        "#,
    )
    .bind(restaurant_id)
    .bind(restaurant_id)
    .bind(branch_id)
    .bind(branch_id)
    .bind(day)
    .fetch_one(pool)
    .await
}

/// Orders and revenue per hour of `day`; hours without orders are absent
pub async fn hourly_on_day(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    branch_id: Option<i64>,
    day: i64,
) -> RepoResult<Vec<HourlySales>> {
    sqlx::query_as::<_, HourlySales>(
        r#"
        SELECT order_hour AS hour, COUNT(*) AS orders, SUM(total_amount) AS revenue
        FROM analytics_orders
        WHERE (? IS NULL OR restaurant_id = ?)
          AND (? IS NULL OR branch_id = ?)
          AND order_day = ?
        GROUP BY order_hour
        ORDER BY order_hour
        "#,
    )
    .bind(restaurant_id)
    .bind(restaurant_id)
    .bind(branch_id)
    .bind(branch_id)
    .bind(day)
    .fetch_all(pool)
    .await
}

/// Running totals of items last ordered in `[from, to)`, most ordered first
pub async fn items_last_ordered_between(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    branch_id: Option<i64>,
    from: i64,
    to: i64,
    limit: i64,
) -> RepoResult<Vec<ItemPerformance>> {
    sqlx::query_as::<_, ItemPerformance>(
        r#"
        SELECT a.menu_item_id AS menu_item_id, mi.name AS name,
               SUM(a.order_count) AS order_count,
               SUM(a.total_quantity) AS total_quantity,
               SUM(a.total_revenue) AS total_revenue
        FROM analytics_menu_items a
        JOIN menu_items mi ON mi.id = a.menu_item_id
        WHERE (? IS NULL OR a.restaurant_id = ?)
          AND (? IS NULL OR a.branch_id = ?)
          AND a.last_ordered >= ? AND a.last_ordered < ?
        GROUP BY a.menu_item_id, mi.name
        ORDER BY order_count DESC, mi.name
        LIMIT ?
        "#,
    )
    .bind(restaurant_id)
    .bind(restaurant_id)
    .bind(branch_id)
    .bind(branch_id)
    .bind(from)
    .bind(to)
    .bind(limit)
    .fetch_all(pool)
    .await
}
