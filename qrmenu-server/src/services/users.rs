//! Staff accounts
//!
//! Users are never hard-deleted; delete sets the account inactive. A caller
//! can only create or manage accounts whose role ranks at or below their own.

use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Role, Status, User, UserCreate, UserUpdate};
use sqlx::SqlitePool;

use super::check_not_blank;
use crate::auth::permissions::MANAGE_STAFF;
use crate::auth::{CurrentUser, SessionStore, scope};
use crate::db::repository::user::{NewUser, UserFilter};
use crate::db::repository::{branch, restaurant, user as users};
use crate::error::{ServiceResult, is_unique_violation};
use crate::util::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, present, require_fields, validate_email,
    validate_optional_text, validate_password,
};
use crate::util::{hash_password, normalize_email};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub role: Option<String>,
    pub status: Option<Status>,
}

fn parse_role(raw: &str) -> Result<Role, AppError> {
    raw.trim().parse::<Role>().map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRole, e.to_string()).with_detail("role", raw)
    })
}

pub async fn list(pool: &SqlitePool, caller: &CurrentUser, query: &UserQuery) -> ServiceResult<Vec<User>> {
    let role = query.role.as_deref().map(parse_role).transpose()?;
    let scope = scope::resolve(pool, caller, query.restaurant_id, query.branch_id).await?;
    let filter = UserFilter {
        restaurant_id: scope.restaurant_id,
        branch_id: scope.branch_id,
        role,
        status: query.status,
    };
    Ok(users::find_all(pool, &filter).await?)
}

pub async fn get(pool: &SqlitePool, caller: &CurrentUser, id: i64) -> ServiceResult<User> {
    let found = users::find_by_id(pool, id).await?;
    match found {
        Some(u) if visible(caller, &u) => Ok(u),
        _ => Err(AppError::new(ErrorCode::UserNotFound).into()),
    }
}

fn visible(caller: &CurrentUser, target: &User) -> bool {
    if caller.is_super_admin() || caller.id == target.id {
        return true;
    }
    match target.restaurant_id {
        Some(rid) => scope::can_see(caller, rid, target.branch_id),
        None => false,
    }
}

pub async fn create(pool: &SqlitePool, caller: &CurrentUser, data: &UserCreate) -> ServiceResult<i64> {
    caller.require_permission(MANAGE_STAFF)?;
    require_fields(&[
        ("name", present(&data.name)),
        ("email", present(&data.email)),
        ("password", present(&data.password)),
        ("role", present(&data.role)),
    ])?;

    let role = parse_role(data.role.as_deref().unwrap_or_default())?;
    caller.require_role_at_least(role)?;

    let email = normalize_email(data.email.as_deref().unwrap_or_default());
    validate_email(&email)?;
    let password = data.password.as_deref().unwrap_or_default();
    validate_password(password)?;
    check_not_blank(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let (restaurant_id, branch_id) = if role.is_super() {
        (None, None)
    } else {
        let rid = scope::payload_restaurant(caller, data.restaurant_id)?;
        if restaurant::find_by_id(pool, rid).await?.is_none() {
            return Err(AppError::new(ErrorCode::RestaurantNotFound).into());
        }
        let bid = scope::payload_branch(caller, data.branch_id)?;
        if let Some(bid) = bid {
            if !branch::belongs_to(pool, bid, rid).await? {
                return Err(AppError::new(ErrorCode::BranchNotFound).into());
            }
        }
        (Some(rid), bid)
    };

    if users::email_exists(pool, &email).await? {
        return Err(AppError::new(ErrorCode::EmailExists).into());
    }

    let hash = hash_password(password)?;
    let name = data.name.as_deref().unwrap_or_default().trim();
    let new_user = NewUser {
        email: &email,
        password_hash: &hash,
        name,
        phone: data.phone.as_deref(),
        role,
        restaurant_id,
        branch_id,
    };
    let id = match users::create(pool, &new_user).await {
        Ok(id) => id,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::EmailExists).into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(new_user_id = id, role = %role, user_id = caller.id, "User created");
    Ok(id)
}

/// Update an account
///
/// Disabling it or changing its role or branch ends its live sessions, so
/// the next request logs in again with the new snapshot.
pub async fn update(
    pool: &SqlitePool,
    sessions: &SessionStore,
    caller: &CurrentUser,
    id: i64,
    data: &UserUpdate,
) -> ServiceResult<()> {
    caller.require_permission(MANAGE_STAFF)?;
    let target = get(pool, caller, id).await?;
    caller.require_role_at_least(target.role)?;
    scope::payload_keeps_restaurant(caller, target.restaurant_id, data.restaurant_id)?;

    let role = data.role.as_deref().map(parse_role).transpose()?;
    if let Some(role) = role {
        caller.require_role_at_least(role)?;
        if role.is_super() != target.role.is_super() {
            return Err(AppError::validation(
                "Cannot move an account into or out of the super admin role",
            )
            .into());
        }
    }

    if id == caller.id && data.status == Some(Status::Inactive) {
        return Err(AppError::validation("You cannot disable your own account").into());
    }

    check_not_blank(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    if let Some(bid) = data.branch_id {
        scope::payload_branch(caller, Some(bid))?;
        let in_restaurant = match target.restaurant_id {
            Some(rid) => branch::belongs_to(pool, bid, rid).await?,
            None => false,
        };
        if !in_restaurant {
            return Err(AppError::new(ErrorCode::BranchNotFound).into());
        }
    }

    let hash = match data.password.as_deref() {
        Some(p) => {
            validate_password(p)?;
            Some(hash_password(p)?)
        }
        None => None,
    };

    if !users::update(pool, id, data, role, hash.as_deref()).await? {
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    }
    if data.status == Some(Status::Inactive) || role.is_some() || data.branch_id.is_some() {
        sessions.remove_user(id);
    }
    tracing::info!(target_user_id = id, user_id = caller.id, "User updated");
    Ok(())
}

/// Soft-disable the account and end its sessions
pub async fn delete(
    pool: &SqlitePool,
    sessions: &SessionStore,
    caller: &CurrentUser,
    id: i64,
) -> ServiceResult<()> {
    caller.require_permission(MANAGE_STAFF)?;
    if id == caller.id {
        return Err(AppError::validation("You cannot disable your own account").into());
    }
    let target = get(pool, caller, id).await?;
    caller.require_role_at_least(target.role)?;

    users::set_status(pool, id, Status::Inactive).await?;
    let revoked = sessions.remove_user(id);
    tracing::info!(target_user_id = id, user_id = caller.id, revoked, "User disabled");
    Ok(())
}
