//! Tenant scoping
//!
//! Every resource query runs against the ids resolved here, never against
//! ids taken straight from the request. `super_admin` is unscoped; everyone
//! else is pinned to their restaurant, and branch-pinned roles to their
//! branch.

use shared::error::{AppError, ErrorCode};
use sqlx::SqlitePool;

use super::session::CurrentUser;
use crate::db::repository::branch;
use crate::error::ServiceResult;

/// Restaurant filter to apply; `None` means all restaurants
pub fn effective_restaurant_id(user: &CurrentUser, requested: Option<i64>) -> Option<i64> {
    if user.is_super_admin() {
        requested
    } else {
        user.restaurant_id
    }
}

/// Branch filter to apply; `None` means every branch in scope
pub fn effective_branch_id(user: &CurrentUser, requested: Option<i64>) -> Option<i64> {
    if user.is_super_admin() {
        requested
    } else if user.branch_id.is_some() {
        user.branch_id
    } else {
        requested
    }
}

/// Resolved filter pair for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
}

/// Resolve a listing scope and validate any narrowing branch filter
///
/// A restaurant-level caller may filter by a branch, but only one that
/// belongs to their restaurant; anything else reads as missing.
pub async fn resolve(
    pool: &SqlitePool,
    user: &CurrentUser,
    requested_restaurant: Option<i64>,
    requested_branch: Option<i64>,
) -> ServiceResult<Scope> {
    let restaurant_id = restaurant_filter(user, requested_restaurant)?;
    let branch_id = effective_branch_id(user, requested_branch);

    if let (Some(rid), Some(bid), None) = (restaurant_id, branch_id, user.branch_id) {
        if !branch::belongs_to(pool, bid, rid).await? {
            return Err(AppError::new(ErrorCode::BranchNotFound).into());
        }
    }

    Ok(Scope {
        restaurant_id,
        branch_id,
    })
}

/// [`effective_restaurant_id`] for listings; refuses a non-super user
/// without a restaurant instead of widening to all
pub fn restaurant_filter(user: &CurrentUser, requested: Option<i64>) -> Result<Option<i64>, AppError> {
    match effective_restaurant_id(user, requested) {
        None if !user.is_super_admin() => own_restaurant(user).map(Some),
        rid => Ok(rid),
    }
}

/// The caller's restaurant; a non-super user without one sees nothing
pub fn own_restaurant(user: &CurrentUser) -> Result<i64, AppError> {
    user.restaurant_id.ok_or_else(|| {
        crate::security_log!("WARN", "tenantless_user", user_id = user.id);
        AppError::tenant_mismatch()
    })
}

/// Restaurant a create payload should land in
///
/// Super admins must name one. Others get their own; naming a different
/// restaurant is refused outright.
pub fn payload_restaurant(user: &CurrentUser, requested: Option<i64>) -> Result<i64, AppError> {
    if user.is_super_admin() {
        return requested.ok_or_else(|| AppError::missing_fields(&["restaurant_id"]));
    }
    let own = own_restaurant(user)?;
    match requested {
        Some(rid) if rid != own => {
            crate::security_log!(
                "WARN",
                "tenant_mismatch",
                user_id = user.id,
                requested = rid,
                own = own
            );
            Err(AppError::tenant_mismatch())
        }
        _ => Ok(own),
    }
}

/// Branch a create payload should land in
///
/// Branch-pinned callers get their branch and may not name another.
pub fn payload_branch(user: &CurrentUser, requested: Option<i64>) -> Result<Option<i64>, AppError> {
    if user.is_super_admin() {
        return Ok(requested);
    }
    match (user.branch_id, requested) {
        (Some(own), Some(bid)) if bid != own => {
            crate::security_log!(
                "WARN",
                "tenant_mismatch",
                user_id = user.id,
                requested_branch = bid,
                own_branch = own
            );
            Err(AppError::tenant_mismatch())
        }
        (Some(own), _) => Ok(Some(own)),
        (None, requested) => Ok(requested),
    }
}

/// Check the restaurant an update payload names against the row's owner
///
/// Ownership of an existing row never changes. Naming a restaurant other
/// than the caller's own, or other than the row's, is a tenant mismatch.
pub fn payload_keeps_restaurant(
    user: &CurrentUser,
    row_restaurant: Option<i64>,
    requested: Option<i64>,
) -> Result<(), AppError> {
    let Some(rid) = requested else {
        return Ok(());
    };
    if !user.is_super_admin() {
        payload_restaurant(user, Some(rid))?;
    }
    if row_restaurant != Some(rid) {
        crate::security_log!(
            "WARN",
            "tenant_move_refused",
            user_id = user.id,
            requested = rid
        );
        return Err(AppError::tenant_mismatch());
    }
    Ok(())
}

/// True when a row owned by `restaurant_id` (and optionally a branch) is visible
pub fn can_see(user: &CurrentUser, restaurant_id: i64, branch_id: Option<i64>) -> bool {
    if user.is_super_admin() {
        return true;
    }
    if user.restaurant_id != Some(restaurant_id) {
        return false;
    }
    match (user.branch_id, branch_id) {
        (Some(own), Some(row)) => own == row,
        _ => true,
    }
}

/// Branch-level visibility check: a branch row's own id is its branch
pub fn can_see_branch(user: &CurrentUser, restaurant_id: i64, branch_id: i64) -> bool {
    can_see(user, restaurant_id, Some(branch_id))
}
