//! Orders (staff side)

use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderCreate, OrderCreated, OrderDetail, OrderStatus, OrderUpdate, PaymentStatus};
use sqlx::SqlitePool;

use crate::auth::permissions::MANAGE_ORDERS;
use crate::auth::{CurrentUser, scope};
use crate::db::repository::order::{self, OrderFilter};
use crate::error::ServiceResult;
use crate::modules::ModuleRegistry;
use crate::orders::{self, load_detail};
use crate::util::now_millis;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub status: Option<String>,
}

fn parse_status(raw: &str) -> Result<OrderStatus, AppError> {
    raw.trim()
        .parse()
        .map_err(|s: String| AppError::new(ErrorCode::InvalidOrderStatus).with_detail("status", s))
}

fn parse_payment_status(raw: &str) -> Result<PaymentStatus, AppError> {
    raw.trim().parse().map_err(|s: String| {
        AppError::new(ErrorCode::InvalidPaymentStatus).with_detail("payment_status", s)
    })
}

/// Orders in scope, newest first, each with its lines
pub async fn list(pool: &SqlitePool, user: &CurrentUser, query: &OrderQuery) -> ServiceResult<Vec<OrderDetail>> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let scope = scope::resolve(pool, user, query.restaurant_id, query.branch_id).await?;
    let filter = OrderFilter {
        restaurant_id: scope.restaurant_id,
        branch_id: scope.branch_id,
        status,
    };

    let headers = order::find_all(pool, &filter).await?;
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let items = order::find_lines(pool, header.id).await?;
        out.push(OrderDetail {
            order: header,
            items,
        });
    }
    Ok(out)
}

pub async fn get(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<OrderDetail> {
    match load_detail(pool, id).await? {
        Some(d) if scope::can_see(user, d.order.restaurant_id, Some(d.order.branch_id)) => Ok(d),
        _ => Err(AppError::new(ErrorCode::OrderNotFound).into()),
    }
}

/// Staff-entered order, pinned to the caller's tenant
pub async fn create(
    pool: &SqlitePool,
    modules: &ModuleRegistry,
    user: &CurrentUser,
    data: &OrderCreate,
) -> ServiceResult<OrderCreated> {
    user.require_permission(MANAGE_ORDERS)?;
    let restaurant_id = scope::payload_restaurant(user, data.restaurant_id)?;
    let Some(branch_id) = scope::payload_branch(user, data.branch_id)? else {
        return Err(AppError::missing_fields(&["branch_id"]).into());
    };
    orders::create_order(pool, modules, restaurant_id, branch_id, data, now_millis()).await
}

/// Only the status fields are mutable; any of the six statuses may be set
pub async fn update(pool: &SqlitePool, user: &CurrentUser, id: i64, data: &OrderUpdate) -> ServiceResult<()> {
    user.require_permission(MANAGE_ORDERS)?;
    get(pool, user, id).await?;

    if data.status.is_none() && data.payment_status.is_none() {
        return Err(AppError::validation("No data provided for update").into());
    }
    let status = data.status.as_deref().map(parse_status).transpose()?;
    let payment_status = data
        .payment_status
        .as_deref()
        .map(parse_payment_status)
        .transpose()?;

    if !order::update_status(pool, id, status, payment_status).await? {
        return Err(AppError::new(ErrorCode::OrderNotFound).into());
    }
    tracing::info!(
        order_id = id,
        status = ?status,
        payment_status = ?payment_status,
        user_id = user.id,
        "Order updated"
    );
    Ok(())
}

pub async fn delete(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<()> {
    user.require_permission(MANAGE_ORDERS)?;
    get(pool, user, id).await?;
    order::delete(pool, id).await?;
    tracing::info!(order_id = id, user_id = user.id, "Order deleted");
    Ok(())
}
