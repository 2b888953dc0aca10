//! Branches

use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Branch, BranchCreate, BranchUpdate};
use sqlx::SqlitePool;

use super::check_not_blank;
use crate::auth::permissions::MANAGE_BRANCHES;
use crate::auth::{CurrentUser, scope};
use crate::db::repository::{branch, restaurant};
use crate::error::ServiceResult;
use crate::util::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, present, require_fields,
    validate_email, validate_optional_text,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchQuery {
    pub restaurant_id: Option<i64>,
}

pub async fn list(pool: &SqlitePool, user: &CurrentUser, query: &BranchQuery) -> ServiceResult<Vec<Branch>> {
    let scope = scope::resolve(pool, user, query.restaurant_id, None).await?;
    Ok(branch::find_all(pool, scope.restaurant_id, scope.branch_id).await?)
}

pub async fn get(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<Branch> {
    match branch::find_by_id(pool, id).await? {
        Some(b) if scope::can_see_branch(user, b.restaurant_id, b.id) => Ok(b),
        _ => Err(AppError::new(ErrorCode::BranchNotFound).into()),
    }
}

pub async fn create(pool: &SqlitePool, user: &CurrentUser, data: &BranchCreate) -> ServiceResult<i64> {
    user.require_permission(MANAGE_BRANCHES)?;
    require_fields(&[
        (
            "restaurant_id",
            !user.is_super_admin() || data.restaurant_id.is_some(),
        ),
        ("name", present(&data.name)),
        ("address", present(&data.address)),
        ("phone", present(&data.phone)),
    ])?;
    let restaurant_id = scope::payload_restaurant(user, data.restaurant_id)?;
    if restaurant::find_by_id(pool, restaurant_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::RestaurantNotFound).into());
    }
    validate(
        &data.name,
        &data.address,
        &data.phone,
        &data.email,
        &data.description,
        data.latitude,
        data.longitude,
    )?;

    let id = branch::create(pool, restaurant_id, data).await?;
    tracing::info!(branch_id = id, restaurant_id, user_id = user.id, "Branch created");
    Ok(id)
}

pub async fn update(pool: &SqlitePool, user: &CurrentUser, id: i64, data: &BranchUpdate) -> ServiceResult<()> {
    user.require_permission(MANAGE_BRANCHES)?;
    let current = get(pool, user, id).await?;
    scope::payload_keeps_restaurant(user, Some(current.restaurant_id), data.restaurant_id)?;
    validate(
        &data.name,
        &data.address,
        &data.phone,
        &data.email,
        &data.description,
        data.latitude,
        data.longitude,
    )?;

    if !branch::update(pool, id, data).await? {
        return Err(AppError::new(ErrorCode::BranchNotFound).into());
    }
    tracing::info!(branch_id = id, user_id = user.id, "Branch updated");
    Ok(())
}

/// Refused while orders or staff still reference the branch
pub async fn delete(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<()> {
    user.require_permission(MANAGE_BRANCHES)?;
    get(pool, user, id).await?;

    let dependents = branch::count_dependents(pool, id).await?;
    if dependents > 0 {
        return Err(AppError::new(ErrorCode::BranchHasDependents)
            .with_detail("dependents", dependents)
            .into());
    }

    branch::delete(pool, id).await?;
    tracing::info!(branch_id = id, user_id = user.id, "Branch deleted");
    Ok(())
}

fn validate(
    name: &Option<String>,
    address: &Option<String>,
    phone: &Option<String>,
    email: &Option<String>,
    description: &Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(), AppError> {
    check_not_blank(name, "name", MAX_NAME_LEN)?;
    check_not_blank(address, "address", MAX_ADDRESS_LEN)?;
    check_not_blank(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    if let Some(email) = email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim())?;
    }
    if latitude.is_some_and(|v| !v.is_finite() || !(-90.0..=90.0).contains(&v)) {
        return Err(AppError::validation("latitude must be between -90 and 90"));
    }
    if longitude.is_some_and(|v| !v.is_finite() || !(-180.0..=180.0).contains(&v)) {
        return Err(AppError::validation("longitude must be between -180 and 180"));
    }
    Ok(())
}
