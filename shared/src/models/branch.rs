//! Branch Model

use super::Status;
use serde::{Deserialize, Serialize};

/// Branch entity, owned by one restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Status,
    pub created_at: i64,
    pub updated_at: i64,
    /// Joined from restaurants on list queries
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "db", sqlx(default))]
    pub restaurant_name: Option<String>,
}

/// Create branch payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchCreate {
    pub restaurant_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<Status>,
}

/// Update branch payload
///
/// Restaurant ownership is fixed; `restaurant_id` may only repeat the
/// current owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchUpdate {
    pub restaurant_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<Status>,
}
