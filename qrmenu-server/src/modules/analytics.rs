//! Sales analytics module
//!
//! Records every new order in `analytics_orders` and keeps running
//! per-item totals in `analytics_menu_items`. The daily report in
//! `services::analytics` reads them back.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::OrderDetail;
use shared::util::start_of_day_millis;
use sqlx::SqlitePool;

use super::{HookError, OrderHook};
use crate::db::repository::analytics::{self, ItemFact, OrderFact};
use crate::orders::money::{to_decimal, to_f64};

pub const MODULE_ID: &str = "analytics";

const HOUR_MS: i64 = 3_600_000;

#[derive(Debug, Clone)]
pub struct AnalyticsModule {
    pool: SqlitePool,
}

impl AnalyticsModule {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Order header facts; orders with a customer name count as registered
pub fn order_fact(order: &OrderDetail) -> OrderFact {
    let o = &order.order;
    let order_day = start_of_day_millis(o.created_at);
    let registered = o
        .customer_name
        .as_deref()
        .is_some_and(|n| !n.trim().is_empty());
    OrderFact {
        order_id: o.id,
        restaurant_id: o.restaurant_id,
        branch_id: o.branch_id,
        total_amount: o.total_amount,
        item_count: order.items.len() as i64,
        customer_type: if registered { "registered" } else { "guest" },
        order_day,
        order_hour: (o.created_at - order_day) / HOUR_MS,
        created_at: o.created_at,
    }
}

/// Lines merged per menu item; `None` when a sum is out of range
pub fn item_facts(order: &OrderDetail) -> Option<Vec<ItemFact>> {
    let mut merged: BTreeMap<i64, (i64, Decimal)> = BTreeMap::new();
    for line in &order.items {
        let entry = merged
            .entry(line.menu_item_id)
            .or_insert((0, Decimal::ZERO));
        entry.0 = entry.0.checked_add(line.quantity)?;
        entry.1 = entry.1.checked_add(to_decimal(line.total_price))?;
    }
    Some(
        merged
            .into_iter()
            .map(|(menu_item_id, (quantity, revenue))| ItemFact {
                menu_item_id,
                quantity,
                revenue: to_f64(revenue),
            })
            .collect(),
    )
}

#[async_trait]
impl OrderHook for AnalyticsModule {
    fn id(&self) -> &'static str {
        MODULE_ID
    }

    fn name(&self) -> &'static str {
        "Sales Analytics"
    }

    fn description(&self) -> &'static str {
        "Daily sales, hourly trends and item performance"
    }

    async fn on_order_created(&self, order: &OrderDetail) -> Result<(), HookError> {
        let fact = order_fact(order);
        let items = item_facts(order).ok_or_else(|| {
            HookError::Failed(format!("item totals of order {} are out of range", fact.order_id))
        })?;
        let recorded = analytics::record(&self.pool, &fact, &items).await?;
        if recorded {
            tracing::debug!(
                order_id = fact.order_id,
                items = items.len(),
                "Order recorded for analytics"
            );
        } else {
            tracing::debug!(order_id = fact.order_id, "Order already recorded for analytics");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{Order, OrderItem, OrderStatus, PaymentStatus};

    // 2024-03-15 13:45:00 UTC
    const AT: i64 = 1_710_510_300_000;
    const DAY: i64 = 1_710_460_800_000;

    fn line(menu_item_id: i64, quantity: i64, total_price: f64) -> OrderItem {
        OrderItem {
            id: 0,
            order_id: 1,
            menu_item_id,
            quantity,
            unit_price: total_price / quantity as f64,
            total_price,
            notes: None,
            created_at: AT,
            item_name: None,
        }
    }

    fn order(id: i64, name: Option<&str>, items: Vec<OrderItem>) -> OrderDetail {
        let total = items.iter().map(|i| i.total_price).sum();
        OrderDetail {
            order: Order {
                id,
                restaurant_id: 1,
                branch_id: 2,
                table_number: None,
                customer_name: name.map(str::to_string),
                customer_phone: None,
                customer_email: None,
                status: OrderStatus::Pending,
                total_amount: total,
                payment_method: "cash".into(),
                payment_status: PaymentStatus::Pending,
                notes: None,
                created_at: AT,
                updated_at: AT,
                restaurant_name: None,
                branch_name: None,
            },
            items,
        }
    }

    #[test]
    fn test_order_fact_buckets_day_and_hour() {
        let fact = order_fact(&order(7, Some("Ana"), vec![line(3, 2, 10.0), line(4, 1, 2.5)]));
        assert_eq!(fact.order_day, DAY);
        assert_eq!(fact.order_hour, 13);
        assert_eq!(fact.item_count, 2);
        assert_eq!(fact.customer_type, "registered");

        let fact = order_fact(&order(8, Some("  "), vec![line(3, 1, 5.0)]));
        assert_eq!(fact.customer_type, "guest");
    }

    #[test]
    fn test_item_facts_merge_repeated_items() {
        let facts = item_facts(&order(
            1,
            None,
            vec![line(3, 2, 0.2), line(4, 1, 2.5), line(3, 1, 0.1)],
        ))
        .unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].menu_item_id, 3);
        assert_eq!(facts[0].quantity, 3);
        assert_eq!(facts[0].revenue, 0.3);
        assert_eq!(facts[1].quantity, 1);

        let huge = order(2, None, vec![line(3, i64::MAX, 1.0), line(3, 1, 1.0)]);
        assert_eq!(item_facts(&huge), None);
    }

    #[tokio::test]
    async fn test_records_orders_and_item_totals_once() {
        let db = DbService::in_memory().await.unwrap();
        let module = AnalyticsModule::new(db.pool.clone());

        let first = order(1, None, vec![line(3, 2, 10.0)]);
        module.on_order_created(&first).await.unwrap();
        module
            .on_order_created(&order(2, Some("Ana"), vec![line(3, 1, 5.0), line(3, 1, 5.0)]))
            .await
            .unwrap();
        // a repeated notification changes nothing
        module.on_order_created(&first).await.unwrap();

        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analytics_orders")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(orders, 2);

        let (count, quantity, revenue): (i64, i64, f64) = sqlx::query_as(
            "SELECT order_count, total_quantity, total_revenue FROM analytics_menu_items \
             WHERE restaurant_id = 1 AND branch_id = 2 AND menu_item_id = 3",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!((count, quantity), (2, 4));
        assert!((revenue - 20.0).abs() < 1e-9);

        let summary = analytics::sales_on_day(&db.pool, Some(1), None, DAY).await.unwrap();
        assert_eq!(summary.total_orders, 2);
        assert!((summary.avg_order_value - 10.0).abs() < 1e-9);
    }
}
