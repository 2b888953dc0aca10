//! Session Store
//!
//! Opaque server-side sessions keyed by a random token. A session holds the
//! authenticated user's snapshot and its last activity time; expiry is idle
//! based and checked by [`super::AuthService`].

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Role, User};

use super::permissions::{self, ALL};

/// The authenticated caller
///
/// Snapshot of the user taken at login. Role and tenant pins do not change
/// for the life of the session.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub restaurant_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub permissions: Vec<String>,
}

impl CurrentUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            restaurant_id: user.restaurant_id,
            branch_id: user.branch_id,
            permissions: permissions::permissions_for(user.role)
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        permissions::is_super_role(self.role)
    }

    /// Check permission: super admin, the `all` token, or an exact match
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.is_super_admin() {
            return true;
        }
        self.permissions.iter().any(|p| p == ALL || p == permission)
    }

    pub fn require_permission(&self, permission: &str) -> Result<(), AppError> {
        if self.has_permission(permission) {
            return Ok(());
        }
        crate::security_log!(
            "WARN",
            "permission_denied",
            user_id = self.id,
            role = self.role.as_str(),
            permission = permission
        );
        Err(AppError::permission_denied(format!(
            "Permission denied: {permission}"
        )))
    }

    /// Exact role match; super admin always passes
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.is_super_admin() || self.role == role {
            return Ok(());
        }
        crate::security_log!(
            "WARN",
            "role_required",
            user_id = self.id,
            role = self.role.as_str(),
            required = role.as_str()
        );
        Err(AppError::with_message(
            ErrorCode::RoleRequired,
            format!("Role {role} required"),
        ))
    }

    /// Hierarchical check: the caller's role ranks at or above `role`
    pub fn require_role_at_least(&self, role: Role) -> Result<(), AppError> {
        if self.role.at_least(role) {
            return Ok(());
        }
        crate::security_log!(
            "WARN",
            "role_too_low",
            user_id = self.id,
            role = self.role.as_str(),
            required = role.as_str()
        );
        Err(AppError::with_message(
            ErrorCode::RoleTooHigh,
            format!("Cannot act on role {role}"),
        ))
    }
}

/// A live session
#[derive(Debug, Clone)]
pub struct Session {
    pub user: CurrentUser,
    pub created_at: i64,
    pub last_activity: i64,
}

impl Session {
    pub fn is_expired(&self, now: i64, lifetime_secs: i64) -> bool {
        now - self.last_activity >= lifetime_secs * 1000
    }
}

/// Concurrent in-memory session map
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session and return its token
    pub fn create(&self, user: CurrentUser, now: i64) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                user,
                created_at: now,
                last_activity: now,
            },
        );
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|s| s.clone())
    }

    /// Refresh `last_activity`; false when the token is unknown
    pub fn touch(&self, token: &str, now: i64) -> bool {
        match self.sessions.get_mut(token) {
            Some(mut session) => {
                session.last_activity = now;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, s)| s)
    }

    /// End every session belonging to `user_id`
    pub fn remove_user(&self, user_id: i64) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.user.id != user_id);
        before.saturating_sub(self.sessions.len())
    }

    /// Drop every session idle for longer than `lifetime_secs`
    pub fn purge_expired(&self, now: i64, lifetime_secs: i64) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(now, lifetime_secs));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
