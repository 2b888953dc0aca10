//! Server configuration

use crate::BoxError;
use std::path::PathBuf;

/// Server configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Idle timeout of a session, in seconds
    pub session_lifetime_secs: i64,
    /// Failed logins allowed per email inside the window
    pub max_login_attempts: i64,
    /// Sliding window for failed logins, in seconds
    pub login_attempt_window_secs: i64,
    /// JSON file holding the enabled module ids
    pub enabled_modules_file: PathBuf,
    /// Name of the session cookie
    pub session_cookie: String,
    /// Seeded super_admin account
    pub admin_email: String,
    pub admin_password: String,
    /// Allowed CORS origins; empty means permissive
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str, dev_default: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                dev_default.to_string()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://qrmenu.db".into()),
            http_port: Self::parse_or("HTTP_PORT", 8080),
            session_lifetime_secs: Self::parse_or("SESSION_LIFETIME_SECS", 7200),
            max_login_attempts: Self::parse_or("MAX_LOGIN_ATTEMPTS", 5),
            login_attempt_window_secs: Self::parse_or("LOGIN_ATTEMPT_WINDOW_SECS", 900),
            enabled_modules_file: std::env::var("ENABLED_MODULES_FILE")
                .unwrap_or_else(|_| "enabled_modules.json".into())
                .into(),
            session_cookie: std::env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| "qrmenu_session".into()),
            admin_email: Self::require_secret("ADMIN_EMAIL", &environment, "admin@qrmenu.com")?,
            admin_password: Self::require_secret("ADMIN_PASSWORD", &environment, "admin123")?,
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            environment,
        })
    }

    /// Configuration for tests and embedded use: in-memory database, defaults
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "test".into(),
            session_lifetime_secs: 7200,
            max_login_attempts: 5,
            login_attempt_window_secs: 900,
            enabled_modules_file: std::env::temp_dir()
                .join(format!("qrmenu_modules_{}.json", uuid::Uuid::new_v4().simple())),
            session_cookie: "qrmenu_session".into(),
            admin_email: "admin@qrmenu.com".into(),
            admin_password: "admin123".into(),
            cors_origins: Vec::new(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
