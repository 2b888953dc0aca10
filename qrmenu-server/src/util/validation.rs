//! Input validation helpers
//!
//! Length limits and required-field checks shared by the resource services.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, branch, category, item, user
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, ingredients, notes
pub const MAX_NOTE_LEN: usize = 1000;

/// Short identifiers: phone, table number, payment method
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Numeric limits ──────────────────────────────────────────────────

/// Menu item price ceiling
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Per-line quantity ceiling
pub const MAX_QUANTITY: i64 = 9999;

// ── Required fields ─────────────────────────────────────────────────

/// True when the value is present and not blank
pub fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Fail with one error naming every missing field
///
/// Each entry pairs a field name with whether it was supplied.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::missing_fields(&missing))
    }
}

// ── Text checks ─────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) if v.len() > max_len => Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))),
        _ => Ok(()),
    }
}

/// Loose structural email check: `local@domain.tld`, no spaces
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email.len() <= MAX_EMAIL_LEN
        && !email.contains(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });
    if valid {
        Ok(())
    } else {
        Err(AppError::validation("Invalid email format"))
    }
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

/// Prices must be finite, non-negative and at most [`MAX_PRICE`]
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::new(ErrorCode::InvalidPrice));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("price exceeds maximum allowed ({MAX_PRICE}), got {price}"),
        ));
    }
    Ok(())
}

/// Quantities above [`MAX_QUANTITY`] are refused; low ones are clamped elsewhere
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}
