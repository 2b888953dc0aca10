//! Order transaction
//!
//! Prices every line from the menu as it is at call time, then writes the
//! header and all lines in one transaction. Any client-supplied price is
//! ignored. After commit, enabled modules are told about the new order.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderCreate, OrderCreated};
use sqlx::SqlitePool;

use super::money::{line_total, order_total, to_f64};
use crate::db::repository::{branch, menu, order};
use crate::db::repository::order::{NewOrder, NewOrderLine};
use crate::error::ServiceResult;
use crate::modules::ModuleRegistry;
use crate::util::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_quantity,
};

const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// A requested line after validation; quantity already clamped
#[derive(Debug, Clone, Copy)]
struct LineRequest<'a> {
    menu_item_id: i64,
    quantity: i64,
    notes: Option<&'a str>,
}

/// Priced line ready to insert
#[derive(Debug, Clone, Copy)]
struct PricedLine<'a> {
    request: LineRequest<'a>,
    unit_price: f64,
    total: Decimal,
}

/// Create an order for `branch_id` of `restaurant_id`
///
/// Fails without writing anything when the line list is empty, a line has
/// no menu item, or any item is missing, unavailable or belongs to another
/// restaurant. The returned total always equals the sum of the line totals.
pub async fn create_order(
    pool: &SqlitePool,
    modules: &ModuleRegistry,
    restaurant_id: i64,
    branch_id: i64,
    data: &OrderCreate,
    now: i64,
) -> ServiceResult<OrderCreated> {
    let lines = validate(data)?;

    if !branch::belongs_to(pool, branch_id, restaurant_id).await? {
        return Err(AppError::new(ErrorCode::BranchNotFound).into());
    }

    let mut tx = pool.begin().await?;

    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        let Some(item) =
            menu::find_orderable_item(&mut *tx, line.menu_item_id, restaurant_id).await?
        else {
            tracing::info!(
                menu_item_id = line.menu_item_id,
                restaurant_id,
                "Order rejected, item unavailable"
            );
            return Err(AppError::new(ErrorCode::ItemUnavailable)
                .with_detail("menu_item_id", line.menu_item_id)
                .into());
        };
        let total = line_total(item.price, line.quantity).ok_or_else(out_of_range)?;
        priced.push(PricedLine {
            request: line,
            unit_price: item.price,
            total,
        });
    }

    let total = order_total(priced.iter().map(|l| l.total)).ok_or_else(out_of_range)?;
    let header = NewOrder {
        restaurant_id,
        branch_id,
        table_number: data.table_number.as_deref(),
        customer_name: data.customer_name.as_deref(),
        customer_phone: data.customer_phone.as_deref(),
        customer_email: data.customer_email.as_deref(),
        total_amount: to_f64(total),
        payment_method: data
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_PAYMENT_METHOD),
        notes: data.notes.as_deref(),
    };
    let order_id = order::insert_header(&mut *tx, &header, now).await?;

    for line in &priced {
        order::insert_line(
            &mut *tx,
            order_id,
            &NewOrderLine {
                menu_item_id: line.request.menu_item_id,
                quantity: line.request.quantity,
                unit_price: line.unit_price,
                total_price: to_f64(line.total),
                notes: line.request.notes,
            },
            now,
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        order_id,
        restaurant_id,
        branch_id,
        lines = priced.len(),
        total = header.total_amount,
        "Order created"
    );

    notify_modules(pool, modules, order_id).await;

    Ok(OrderCreated {
        order_id,
        total_amount: header.total_amount,
    })
}

fn out_of_range() -> AppError {
    AppError::validation("Order total is out of range")
}

fn validate(data: &OrderCreate) -> Result<Vec<LineRequest<'_>>, AppError> {
    if data.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let missing: Vec<String> = data
        .items
        .iter()
        .enumerate()
        .filter(|(_, l)| l.menu_item_id.is_none())
        .map(|(i, _)| format!("items[{i}].menu_item_id"))
        .collect();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(String::as_str).collect();
        return Err(AppError::missing_fields(&names));
    }

    validate_optional_text(&data.table_number, "table_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(&data.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.customer_email, "customer_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&data.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;

    let mut lines = Vec::with_capacity(data.items.len());
    for l in &data.items {
        validate_optional_text(&l.notes, "notes", MAX_NOTE_LEN)?;
        if let Some(q) = l.quantity {
            validate_quantity(q)?;
        }
        if let Some(menu_item_id) = l.menu_item_id {
            lines.push(LineRequest {
                menu_item_id,
                // too low or unreadable means one
                quantity: l.quantity.map_or(1, |q| q.max(1)),
                notes: l.notes.as_deref(),
            });
        }
    }
    Ok(lines)
}

/// Hooks run after commit; nothing here can fail the order
async fn notify_modules(pool: &SqlitePool, modules: &ModuleRegistry, order_id: i64) {
    if modules.enabled_ids().is_empty() {
        return;
    }
    match super::load_detail(pool, order_id).await {
        Ok(Some(detail)) => modules.dispatch_order_created(&detail).await,
        Ok(None) => tracing::warn!(order_id, "Created order vanished before hooks ran"),
        Err(e) => tracing::warn!(order_id, error = %e, "Could not load order for hooks"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support as ts;
    use shared::models::{OrderLineRequest, OrderStatus, PaymentStatus};

    async fn counts(pool: &SqlitePool) -> (i64, i64) {
        let orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
            .unwrap();
        let lines = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items")
            .fetch_one(pool)
            .await
            .unwrap();
        (orders, lines)
    }

    fn line(menu_item_id: i64, quantity: Option<i64>) -> OrderLineRequest {
        OrderLineRequest {
            menu_item_id: Some(menu_item_id),
            quantity,
            ..Default::default()
        }
    }

    struct Fixture {
        pool: SqlitePool,
        restaurant: i64,
        branch: i64,
        item: i64,
        unavailable: i64,
    }

    async fn fixture() -> Fixture {
        let pool = ts::pool().await;
        let restaurant = ts::restaurant(&pool, "R1").await;
        let branch = ts::branch(&pool, restaurant, "B1").await;
        let cat = ts::category(&pool, restaurant, "Mains").await;
        let item = ts::item(&pool, restaurant, cat, "Biryani", 100.0, true).await;
        let unavailable = ts::item(&pool, restaurant, cat, "Kebab", 50.0, false).await;
        Fixture {
            pool,
            restaurant,
            branch,
            item,
            unavailable,
        }
    }

    #[tokio::test]
    async fn test_creates_header_and_priced_lines() {
        let f = fixture().await;
        let data = OrderCreate {
            table_number: Some("T4".into()),
            items: vec![OrderLineRequest {
                price: Some(0.01),
                ..line(f.item, Some(2))
            }],
            ..Default::default()
        };
        let created = create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
            .await
            .unwrap();
        assert_eq!(created.total_amount, 200.0);

        let detail = crate::orders::load_detail(&f.pool, created.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.order.status, OrderStatus::Pending);
        assert_eq!(detail.order.payment_status, PaymentStatus::Pending);
        assert_eq!(detail.order.payment_method, "cash");
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].unit_price, 100.0);
        assert_eq!(detail.items[0].total_price, 200.0);
    }

    #[tokio::test]
    async fn test_empty_order_writes_nothing() {
        let f = fixture().await;
        let err = create_order(
            &f.pool,
            &ts::no_modules(),
            f.restaurant,
            f.branch,
            &OrderCreate::default(),
            1,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::OrderEmpty));
        assert_eq!(counts(&f.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_one_unavailable_line_rolls_back_everything() {
        let f = fixture().await;
        let data = OrderCreate {
            items: vec![line(f.item, Some(1)), line(f.unavailable, Some(1))],
            ..Default::default()
        };
        let err = create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ItemUnavailable));
        assert_eq!(counts(&f.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_item_of_another_restaurant_is_unavailable() {
        let f = fixture().await;
        let other = ts::restaurant(&f.pool, "R2").await;
        let cat = ts::category(&f.pool, other, "Other").await;
        let foreign = ts::item(&f.pool, other, cat, "Foreign", 10.0, true).await;
        let data = OrderCreate {
            items: vec![line(foreign, None)],
            ..Default::default()
        };
        let err = create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ItemUnavailable));
        assert_eq!(counts(&f.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_quantity_is_clamped_up() {
        let f = fixture().await;
        let data = OrderCreate {
            items: vec![line(f.item, Some(0)), line(f.item, Some(-3)), line(f.item, None)],
            ..Default::default()
        };
        let created = create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
            .await
            .unwrap();
        assert_eq!(created.total_amount, 300.0);
        let qty: Vec<i64> =
            sqlx::query_scalar("SELECT quantity FROM order_items ORDER BY id")
                .fetch_all(&f.pool)
                .await
                .unwrap();
        assert_eq!(qty, vec![1, 1, 1]);
    }

    #[tokio::test]
    async fn test_missing_menu_item_ids_are_all_listed() {
        let f = fixture().await;
        let data = OrderCreate {
            items: vec![
                OrderLineRequest::default(),
                line(f.item, None),
                OrderLineRequest::default(),
            ],
            ..Default::default()
        };
        let err: AppError =
            create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
                .await
                .unwrap_err()
                .into();
        assert_eq!(
            err.message,
            "items[0].menu_item_id is required, items[2].menu_item_id is required"
        );
    }

    #[tokio::test]
    async fn test_branch_of_another_restaurant_is_rejected() {
        let f = fixture().await;
        let other = ts::restaurant(&f.pool, "R2").await;
        let foreign_branch = ts::branch(&f.pool, other, "B2").await;
        let data = OrderCreate {
            items: vec![line(f.item, None)],
            ..Default::default()
        };
        let err = create_order(&f.pool, &ts::no_modules(), f.restaurant, foreign_branch, &data, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::BranchNotFound));
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_refused() {
        let f = fixture().await;
        let data: OrderCreate = serde_json::from_value(serde_json::json!({
            "items": [{"menu_item_id": f.item, "quantity": i64::MAX}]
        }))
        .unwrap();
        let err = create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ValidationFailed));
        assert_eq!(counts(&f.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_total_overflow_is_refused() {
        let f = fixture().await;
        let cat = ts::category(&f.pool, f.restaurant, "Vault").await;
        // stored directly, past the price ceiling the services enforce
        let huge = ts::item(&f.pool, f.restaurant, cat, "Gold", 1e25, true).await;
        let data = OrderCreate {
            items: vec![line(huge, Some(9000))],
            ..Default::default()
        };
        let err = create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ValidationFailed));
        assert_eq!(counts(&f.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_unit_price_is_a_snapshot() {
        let f = fixture().await;
        let data = OrderCreate {
            items: vec![line(f.item, Some(3))],
            ..Default::default()
        };
        let created = create_order(&f.pool, &ts::no_modules(), f.restaurant, f.branch, &data, 1)
            .await
            .unwrap();
        sqlx::query("UPDATE menu_items SET price = 150 WHERE id = ?")
            .bind(f.item)
            .execute(&f.pool)
            .await
            .unwrap();
        let detail = crate::orders::load_detail(&f.pool, created.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.order.total_amount, 300.0);
        assert_eq!(detail.items[0].unit_price, 100.0);
    }
}
