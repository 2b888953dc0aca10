//! Orders
//!
//! - [`money`]: decimal arithmetic for prices and totals
//! - [`create`]: the order transaction

pub mod create;
pub mod money;

pub use create::create_order;

use shared::models::OrderDetail;
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::error::ServiceResult;

/// Order header with its lines, if the order exists
pub async fn load_detail(pool: &SqlitePool, id: i64) -> ServiceResult<Option<OrderDetail>> {
    let Some(header) = order::find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let items = order::find_lines(pool, id).await?;
    Ok(Some(OrderDetail {
        order: header,
        items,
    }))
}
