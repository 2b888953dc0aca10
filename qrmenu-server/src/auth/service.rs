//! Authentication service
//!
//! Credential checks against the users table, the per-email login rate limit,
//! and session lifecycle. Time is passed in explicitly (Unix millis) so the
//! idle timeout and the attempt window can be exercised in tests.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use super::session::{CurrentUser, SessionStore};
use crate::config::Config;
use crate::db::repository::{login_attempt, user};
use crate::error::ServiceResult;
use crate::util::{normalize_email, verify_password};

/// Successful login: the session token and the cached snapshot
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: CurrentUser,
}

/// Request metadata stored with each login attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientInfo<'a> {
    pub ip_address: Option<&'a str>,
    pub user_agent: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    pool: SqlitePool,
    sessions: SessionStore,
    /// One lock per email; count, verify and record run under it
    login_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    session_lifetime_secs: i64,
    max_login_attempts: i64,
    attempt_window_secs: i64,
}

impl AuthService {
    pub fn new(pool: SqlitePool, sessions: SessionStore, config: &Config) -> Self {
        Self {
            pool,
            sessions,
            login_locks: Arc::new(DashMap::new()),
            session_lifetime_secs: config.session_lifetime_secs,
            max_login_attempts: config.max_login_attempts,
            attempt_window_secs: config.login_attempt_window_secs,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn session_lifetime_secs(&self) -> i64 {
        self.session_lifetime_secs
    }

    /// Verify credentials and open a session
    ///
    /// Unknown email, inactive account and wrong password all produce the
    /// same `InvalidCredentials` error. Once an email has collected the
    /// maximum number of failures inside the window, every attempt is refused
    /// until the window slides past them, even with the right password.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: ClientInfo<'_>,
        now: i64,
    ) -> ServiceResult<LoginOutcome> {
        let email = normalize_email(email);
        let mut missing = Vec::new();
        if email.is_empty() {
            missing.push("email");
        }
        if password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing).into());
        }

        let lock = self.login_locks.entry(email.clone()).or_default().clone();
        let _guard = lock.lock().await;

        let since = now - self.attempt_window_secs * 1000;
        let failed = login_attempt::count_failed_since(&self.pool, &email, since).await?;
        if failed >= self.max_login_attempts {
            crate::security_log!(
                "WARN",
                "login_rate_limited",
                email = email.as_str(),
                failed = failed
            );
            return Err(AppError::new(ErrorCode::TooManyAttempts).into());
        }

        let found = user::find_active_by_email(&self.pool, &email).await?;
        let account = match found {
            Some(u) if verify_password(password, &u.password_hash) => u,
            _ => {
                login_attempt::record(
                    &self.pool,
                    &email,
                    false,
                    client.ip_address,
                    client.user_agent,
                    now,
                )
                .await?;
                crate::security_log!(
                    "WARN",
                    "login_failed",
                    email = email.as_str(),
                    failed = failed + 1
                );
                return Err(AppError::invalid_credentials().into());
            }
        };

        login_attempt::clear(&self.pool, &email).await?;
        login_attempt::record(
            &self.pool,
            &email,
            true,
            client.ip_address,
            client.user_agent,
            now,
        )
        .await?;
        user::touch_last_login(&self.pool, account.id, now).await?;

        let current = CurrentUser::from_user(&account);
        let token = self.sessions.create(current.clone(), now);
        tracing::info!(user_id = account.id, role = %account.role, "User logged in");

        Ok(LoginOutcome {
            token,
            user: current,
        })
    }

    /// Destroy the session; unknown tokens are ignored
    pub fn logout(&self, token: &str) {
        if let Some(session) = self.sessions.remove(token) {
            tracing::info!(user_id = session.user.id, "User logged out");
        }
    }

    /// Resolve a token to its user, refreshing `last_activity`
    ///
    /// An idle session stays in the store until the cleanup task runs, but
    /// is no longer accepted here.
    pub fn require_authenticated(
        &self,
        token: Option<&str>,
        now: i64,
    ) -> Result<CurrentUser, AppError> {
        let Some(token) = token else {
            return Err(AppError::not_authenticated());
        };
        let Some(session) = self.sessions.get(token) else {
            return Err(AppError::not_authenticated());
        };
        if session.is_expired(now, self.session_lifetime_secs) {
            crate::security_log!("WARN", "session_expired", user_id = session.user.id);
            return Err(AppError::new(ErrorCode::SessionExpired));
        }
        self.sessions.touch(token, now);
        Ok(session.user)
    }

    pub fn is_authenticated(&self, token: Option<&str>, now: i64) -> bool {
        self.require_authenticated(token, now).is_ok()
    }

    pub fn current_user(&self, token: Option<&str>, now: i64) -> Option<CurrentUser> {
        self.require_authenticated(token, now).ok()
    }

    /// Drop idle sessions and login attempts older than the rate-limit window
    pub async fn cleanup(&self, now: i64) -> ServiceResult<(usize, u64)> {
        let sessions = self
            .sessions
            .purge_expired(now, self.session_lifetime_secs);
        let attempts =
            login_attempt::purge_before(&self.pool, now - self.attempt_window_secs * 1000).await?;
        self.login_locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Ok((sessions, attempts))
    }
}
