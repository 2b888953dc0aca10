//! Site settings (key/value)

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use shared::error::AppError;
use shared::models::Role;
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::setting;
use crate::error::ServiceResult;
use crate::util::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN};

pub async fn list(pool: &SqlitePool) -> ServiceResult<BTreeMap<String, String>> {
    let rows = setting::find_all(pool).await?;
    Ok(rows.into_iter().map(|s| (s.key, s.value)).collect())
}

/// Upsert every pair; scalars only, stored as text
pub async fn update(
    pool: &SqlitePool,
    user: &CurrentUser,
    values: &HashMap<String, Value>,
) -> ServiceResult<usize> {
    user.require_role(Role::SuperAdmin)?;
    if values.is_empty() {
        return Err(AppError::validation("No data provided for update").into());
    }

    let mut pairs = Vec::with_capacity(values.len());
    for (key, value) in values {
        let key = key.trim();
        if key.is_empty() || key.len() > MAX_SHORT_TEXT_LEN {
            return Err(AppError::validation("Invalid setting key").into());
        }
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
            _ => {
                return Err(AppError::validation(format!(
                    "Setting {key} must be a string, number or boolean"
                ))
                .with_detail("key", key)
                .into());
            }
        };
        if text.len() > MAX_NOTE_LEN {
            return Err(AppError::validation(format!("Setting {key} is too long")).into());
        }
        pairs.push((key.to_string(), text));
    }

    for (key, value) in &pairs {
        setting::upsert(pool, key, value, None).await?;
    }
    tracing::info!(count = pairs.len(), user_id = user.id, "Settings updated");
    Ok(pairs.len())
}
