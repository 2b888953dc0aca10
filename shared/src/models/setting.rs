//! Site setting Model

use serde::{Deserialize, Serialize};

/// Key/value site setting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}
