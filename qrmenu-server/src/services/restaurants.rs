//! Restaurants (top-level tenants)

use shared::error::{AppError, ErrorCode};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use sqlx::SqlitePool;

use super::check_not_blank;
use crate::auth::permissions::MANAGE_RESTAURANT;
use crate::auth::{CurrentUser, scope};
use crate::db::repository::restaurant;
use crate::error::ServiceResult;
use crate::util::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, present,
    require_fields, validate_email, validate_optional_text,
};

pub async fn list(pool: &SqlitePool, user: &CurrentUser) -> ServiceResult<Vec<Restaurant>> {
    let scope = scope::resolve(pool, user, None, None).await?;
    Ok(restaurant::find_all(pool, scope.restaurant_id).await?)
}

pub async fn get(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<Restaurant> {
    match restaurant::find_by_id(pool, id).await? {
        Some(r) if scope::can_see(user, r.id, None) => Ok(r),
        _ => Err(AppError::new(ErrorCode::RestaurantNotFound).into()),
    }
}

/// New restaurants are new tenants, so only the super role may add one
pub async fn create(pool: &SqlitePool, user: &CurrentUser, data: &RestaurantCreate) -> ServiceResult<i64> {
    user.require_permission(MANAGE_RESTAURANT)?;
    if !user.is_super_admin() {
        crate::security_log!("WARN", "tenant_create_denied", user_id = user.id);
        return Err(AppError::tenant_mismatch().into());
    }

    require_fields(&[
        ("name", present(&data.name)),
        ("address", present(&data.address)),
        ("phone", present(&data.phone)),
    ])?;
    validate(
        &data.name,
        &data.address,
        &data.phone,
        &data.email,
        &data.description,
        &data.logo,
        &data.website,
    )?;

    let id = restaurant::create(pool, data).await?;
    tracing::info!(restaurant_id = id, user_id = user.id, "Restaurant created");
    Ok(id)
}

pub async fn update(
    pool: &SqlitePool,
    user: &CurrentUser,
    id: i64,
    data: &RestaurantUpdate,
) -> ServiceResult<()> {
    user.require_permission(MANAGE_RESTAURANT)?;
    get(pool, user, id).await?;
    validate(
        &data.name,
        &data.address,
        &data.phone,
        &data.email,
        &data.description,
        &data.logo,
        &data.website,
    )?;

    if !restaurant::update(pool, id, data).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound).into());
    }
    tracing::info!(restaurant_id = id, user_id = user.id, "Restaurant updated");
    Ok(())
}

/// Refused while anything still belongs to the restaurant
pub async fn delete(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<()> {
    user.require_permission(MANAGE_RESTAURANT)?;
    get(pool, user, id).await?;

    let dependents = restaurant::count_dependents(pool, id).await?;
    if dependents > 0 {
        return Err(AppError::new(ErrorCode::RestaurantHasDependents)
            .with_detail("dependents", dependents)
            .into());
    }

    restaurant::delete(pool, id).await?;
    tracing::info!(restaurant_id = id, user_id = user.id, "Restaurant deleted");
    Ok(())
}

fn validate(
    name: &Option<String>,
    address: &Option<String>,
    phone: &Option<String>,
    email: &Option<String>,
    description: &Option<String>,
    logo: &Option<String>,
    website: &Option<String>,
) -> Result<(), AppError> {
    check_not_blank(name, "name", MAX_NAME_LEN)?;
    check_not_blank(address, "address", MAX_ADDRESS_LEN)?;
    check_not_blank(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(logo, "logo", MAX_URL_LEN)?;
    validate_optional_text(website, "website", MAX_URL_LEN)?;
    if let Some(email) = email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim())?;
    }
    Ok(())
}
