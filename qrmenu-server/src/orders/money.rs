//! Money arithmetic
//!
//! Prices are stored as `f64`, but every sum and product is computed as a
//! `Decimal` and rounded to 2 places (half away from zero) on the way out.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal; non-finite input becomes zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `unit_price * quantity`, rounded; `None` when the product overflows
pub fn line_total(unit_price: f64, quantity: i64) -> Option<Decimal> {
    to_decimal(unit_price)
        .checked_mul(Decimal::from(quantity))
        .map(round)
}

/// Sum of already-rounded line totals; `None` on overflow
pub fn order_total<I>(lines: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line))
        .map(round)
}
