//! Resource services
//!
//! Each operation checks the caller's permission first, then resolves the
//! tenant scope, then touches storage. Rows outside the caller's scope are
//! reported as missing, never as forbidden.

pub mod analytics;
pub mod branches;
pub mod dashboard;
pub mod menu;
pub mod orders;
pub mod public;
pub mod restaurants;
pub mod settings;
pub mod users;

use shared::error::AppError;

use crate::util::validation::validate_required_text;

/// Blank values for required columns are rejected on update too
pub(crate) fn check_not_blank(value: &Option<String>, field: &str, max_len: usize) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required_text(v, field, max_len),
        None => Ok(()),
    }
}

