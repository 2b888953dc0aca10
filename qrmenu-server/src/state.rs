//! Application state shared by every handler

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{AuthService, SessionStore};
use crate::config::Config;
use crate::db::{DbService, seed};
use crate::error::ServiceResult;
use crate::modules::analytics::AnalyticsModule;
use crate::modules::loyalty::LoyaltyModule;
use crate::modules::{ModuleRegistry, OrderHook};

/// Shared application state
///
/// Cheap to clone: the pool, the session map and the registry are all
/// reference-counted handles.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Login, logout and session checks
    pub auth: AuthService,
    /// Registered modules and their enabled flags
    pub modules: Arc<ModuleRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the database, seed it and load the module registry
    pub async fn new(config: Config) -> ServiceResult<Self> {
        let db = DbService::new(&config.database_url).await?;
        seed::run(&db.pool, &config.admin_email, &config.admin_password).await?;

        let hooks: Vec<Arc<dyn OrderHook>> = vec![
            Arc::new(LoyaltyModule::new(db.pool.clone())),
            Arc::new(AnalyticsModule::new(db.pool.clone())),
        ];
        let modules = ModuleRegistry::load(config.enabled_modules_file.clone(), hooks)?;

        let auth = AuthService::new(db.pool.clone(), SessionStore::new(), &config);

        Ok(Self {
            pool: db.pool,
            auth,
            modules: Arc::new(modules),
            config: Arc::new(config),
        })
    }
}
