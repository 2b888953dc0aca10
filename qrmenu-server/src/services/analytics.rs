//! Daily sales report from the analytics tables

use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::util::{format_day, parse_day_millis, start_of_day_millis};
use sqlx::SqlitePool;

use crate::auth::permissions::VIEW_REPORTS;
use crate::auth::{CurrentUser, scope};
use crate::db::repository::analytics::{self, HourlySales, ItemPerformance, SalesSummary};
use crate::error::ServiceResult;

const DAY_MS: i64 = 86_400_000;
const POPULAR_ITEMS: i64 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
    /// `YYYY-MM-DD` (UTC), today when absent
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: String,
    pub sales: SalesSummary,
    /// Running totals of the items last ordered on `date`
    pub popular_items: Vec<ItemPerformance>,
    pub hourly_sales: Vec<HourlySales>,
}

/// Sales, popular items and hourly sales of one day within the caller's scope
///
/// Only orders placed while the analytics module was enabled are counted.
pub async fn daily_report(
    pool: &SqlitePool,
    user: &CurrentUser,
    query: &ReportQuery,
    now: i64,
) -> ServiceResult<DailyReport> {
    user.require_permission(VIEW_REPORTS)?;
    let day = match query.date.as_deref() {
        Some(raw) => parse_day_millis(raw).ok_or_else(|| {
            AppError::validation("date must be YYYY-MM-DD").with_detail("date", raw)
        })?,
        None => start_of_day_millis(now),
    };
    let scope = scope::resolve(pool, user, query.restaurant_id, query.branch_id).await?;
    let (rid, bid) = (scope.restaurant_id, scope.branch_id);

    let popular_items =
        analytics::items_last_ordered_between(pool, rid, bid, day, day + DAY_MS, POPULAR_ITEMS).await?;

    Ok(DailyReport {
        date: format_day(day),
        sales: analytics::sales_on_day(pool, rid, bid, day).await?,
        popular_items,
        hourly_sales: analytics::hourly_on_day(pool, rid, bid, day).await?,
    })
}
