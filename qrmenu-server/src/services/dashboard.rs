//! Dashboard statistics, scoped like every other read

use serde::Serialize;
use shared::models::Order;
use shared::util::{start_of_day_millis, start_of_month_millis};
use sqlx::SqlitePool;

use crate::auth::{CurrentUser, scope};
use crate::db::repository::dashboard::{self, OrderTotals, PopularItem};
use crate::db::repository::order;
use crate::error::ServiceResult;

const RECENT_ORDERS: i64 = 10;
const POPULAR_ITEMS: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub today: OrderTotals,
    pub this_month: OrderTotals,
    pub all_time: OrderTotals,
    pub recent_orders: Vec<Order>,
    pub popular_items: Vec<PopularItem>,
}

pub async fn stats(pool: &SqlitePool, user: &CurrentUser, now: i64) -> ServiceResult<DashboardStats> {
    let scope = scope::resolve(pool, user, None, None).await?;
    let (rid, bid) = (scope.restaurant_id, scope.branch_id);

    Ok(DashboardStats {
        today: dashboard::totals_since(pool, rid, bid, start_of_day_millis(now)).await?,
        this_month: dashboard::totals_since(pool, rid, bid, start_of_month_millis(now)).await?,
        all_time: dashboard::totals_since(pool, rid, bid, 0).await?,
        recent_orders: order::find_recent(pool, rid, bid, RECENT_ORDERS).await?,
        popular_items: dashboard::popular_items(pool, rid, bid, POPULAR_ITEMS).await?,
    })
}
