//! Restaurant Model

use super::Status;
use serde::{Deserialize, Serialize};

/// Restaurant entity (top-level tenant)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub status: Status,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub status: Option<Status>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub status: Option<Status>,
}
