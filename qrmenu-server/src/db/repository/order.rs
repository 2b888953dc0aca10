//! Order header and line queries

use shared::models::{Order, OrderItem, OrderStatus, PaymentStatus};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;

const SELECT: &str = r#"
    SELECT o.id, o.restaurant_id, o.branch_id, o.table_number, o.customer_name,
           o.customer_phone, o.customer_email, o.status, o.total_amount, o.payment_method,
           o.payment_status, o.notes, o.created_at, o.updated_at,
           r.name AS restaurant_name, b.name AS branch_name
    FROM orders o
    JOIN restaurants r ON r.id = o.restaurant_id
    JOIN branches b ON b.id = o.branch_id
"#;

const LINE_SELECT: &str = r#"
    SELECT oi.id, oi.order_id, oi.menu_item_id, oi.quantity, oi.unit_price, oi.total_price,
           oi.notes, oi.created_at, mi.name AS item_name
    FROM order_items oi
    JOIN menu_items mi ON mi.id = oi.menu_item_id
"#;

/// Header row to insert
#[derive(Debug, Clone)]
pub struct NewOrder<'a> {
    pub restaurant_id: i64,
    pub branch_id: i64,
    pub table_number: Option<&'a str>,
    pub customer_name: Option<&'a str>,
    pub customer_phone: Option<&'a str>,
    pub customer_email: Option<&'a str>,
    pub total_amount: f64,
    pub payment_method: &'a str,
    pub notes: Option<&'a str>,
}

/// Priced line to insert
#[derive(Debug, Clone)]
pub struct NewOrderLine<'a> {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub notes: Option<&'a str>,
}

/// Listing filters; `None` means unfiltered
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub status: Option<OrderStatus>,
}

pub async fn insert_header(conn: &mut SqliteConnection, order: &NewOrder<'_>, now: i64) -> RepoResult<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO orders (
            restaurant_id, branch_id, table_number, customer_name, customer_phone,
            customer_email, status, total_amount, payment_method, payment_status, notes,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(order.restaurant_id)
    .bind(order.branch_id)
    .bind(order.table_number)
    .bind(order.customer_name)
    .bind(order.customer_phone)
    .bind(order.customer_email)
    .bind(OrderStatus::Pending)
    .bind(order.total_amount)
    .bind(order.payment_method)
    .bind(PaymentStatus::Pending)
    .bind(order.notes)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await
}

pub async fn insert_line(
    conn: &mut SqliteConnection,
    order_id: i64,
    line: &NewOrderLine<'_>,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_items (
            order_id, menu_item_id, quantity, unit_price, total_price, notes, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(order_id)
    .bind(line.menu_item_id)
    .bind(line.quantity)
    .bind(line.unit_price)
    .bind(line.total_price)
    .bind(line.notes)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_all(pool: &SqlitePool, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{SELECT} WHERE (? IS NULL OR o.restaurant_id = ?) AND (? IS NULL OR o.branch_id = ?) \
           AND (? IS NULL OR o.status = ?) \
         ORDER BY o.created_at DESC, o.id DESC"
    );
    sqlx::query_as::<_, Order>(&sql)
        .bind(filter.restaurant_id)
        .bind(filter.restaurant_id)
        .bind(filter.branch_id)
        .bind(filter.branch_id)
        .bind(filter.status)
        .bind(filter.status)
        .fetch_all(pool)
        .await
}

/// Most recent orders in scope
pub async fn find_recent(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
    branch_id: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{SELECT} WHERE (? IS NULL OR o.restaurant_id = ?) AND (? IS NULL OR o.branch_id = ?) \
         ORDER BY o.created_at DESC, o.id DESC LIMIT ?"
    );
    sqlx::query_as::<_, Order>(&sql)
        .bind(restaurant_id)
        .bind(restaurant_id)
        .bind(branch_id)
        .bind(branch_id)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{SELECT} WHERE o.id = ?");
    sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_lines(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{LINE_SELECT} WHERE oi.order_id = ? ORDER BY oi.id");
    sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: Option<OrderStatus>,
    payment_status: Option<PaymentStatus>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        r#"
        UPDATE orders SET
            status = COALESCE(?, status),
            payment_status = COALESCE(?, payment_status),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(status)
    .bind(payment_status)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete lines then header in one transaction
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM order_items WHERE order_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
