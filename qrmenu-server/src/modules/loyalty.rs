//! Loyalty points module
//!
//! Credits customers with points for every order placed with an email
//! address. The rate comes from the `loyalty_points_per_currency` setting
//! and defaults to one point per currency unit.

use async_trait::async_trait;
use rust_decimal::prelude::*;
use shared::models::OrderDetail;
use sqlx::SqlitePool;

use super::{HookError, OrderHook};
use crate::db::repository::{loyalty, setting};
use crate::orders::money::to_decimal;
use crate::util::{normalize_email, now_millis};

pub const MODULE_ID: &str = "loyalty";

const RATE_SETTING: &str = "loyalty_points_per_currency";

#[derive(Debug, Clone)]
pub struct LoyaltyModule {
    pool: SqlitePool,
}

impl LoyaltyModule {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn rate(&self) -> Result<Decimal, HookError> {
        let raw = setting::find_value(&self.pool, RATE_SETTING).await?;
        match raw {
            None => Ok(Decimal::ONE),
            Some(v) => Decimal::from_str(v.trim())
                .ok()
                .filter(|d| !d.is_sign_negative())
                .ok_or_else(|| HookError::Failed(format!("invalid {RATE_SETTING}: {v}"))),
        }
    }
}

/// Whole points earned for `total` at `rate`; `None` when out of range
pub fn points_for(total: f64, rate: Decimal) -> Option<i64> {
    to_decimal(total).checked_mul(rate)?.floor().to_i64()
}

#[async_trait]
impl OrderHook for LoyaltyModule {
    fn id(&self) -> &'static str {
        MODULE_ID
    }

    fn name(&self) -> &'static str {
        "Loyalty Points"
    }

    fn description(&self) -> &'static str {
        "Award points to customers per order amount"
    }

    async fn on_order_created(&self, order: &OrderDetail) -> Result<(), HookError> {
        let Some(email) = order
            .order
            .customer_email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
        else {
            return Ok(());
        };

        let rate = self.rate().await?;
        let points = points_for(order.order.total_amount, rate).ok_or_else(|| {
            HookError::Failed(format!(
                "points for {} at rate {rate} are out of range",
                order.order.total_amount
            ))
        })?;
        loyalty::credit(
            &self.pool,
            &email,
            points,
            order.order.total_amount,
            now_millis(),
        )
        .await?;
        tracing::debug!(order_id = order.order.id, points, "Loyalty points credited");
        Ok(())
    }
}
