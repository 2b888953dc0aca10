//! Record status shared by tenants, menu entries and users

use serde::{Deserialize, Serialize};

/// Active / inactive flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Status {
    #[default]
    Active,
    Inactive,
}
