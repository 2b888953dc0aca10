//! User Model

use super::{Role, Status};
use serde::{Deserialize, Serialize};

/// User row
///
/// `password_hash` is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub status: Status,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create user payload
///
/// `role` stays a string so an unknown spelling is reported as a validation
/// error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// Must match the account's restaurant when given
    pub restaurant_id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub branch_id: Option<i64>,
    pub status: Option<Status>,
}

/// Login payload
///
/// Both fields are optional so a missing one is reported by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
