//! Module registry
//!
//! Optional features plug into the order flow through [`OrderHook`]. Which
//! registered modules run is decided by a JSON array of module ids on disk,
//! read once at startup and rewritten when a module is enabled or disabled.
//! Hook failures are logged and never reach the caller.

pub mod analytics;
pub mod loyalty;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderDetail;
use thiserror::Error;

use crate::error::ServiceResult;

/// Error returned by a module hook
#[derive(Debug, Error)]
pub enum HookError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Failed(String),
}

/// A module reacting to order events
#[async_trait]
pub trait OrderHook: Send + Sync {
    /// Stable id used in the enabled-modules file
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    /// Runs after an order has been committed
    async fn on_order_created(&self, order: &OrderDetail) -> Result<(), HookError>;
}

/// Registered module with its enablement flag
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

pub struct ModuleRegistry {
    modules: Vec<Arc<dyn OrderHook>>,
    enabled: RwLock<Vec<String>>,
    /// Serialises enable/disable so file and memory change together
    writer: tokio::sync::Mutex<()>,
    file: PathBuf,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.modules.iter().map(|m| m.id()).collect::<Vec<_>>())
            .field("enabled", &*self.enabled.read())
            .field("file", &self.file)
            .finish()
    }
}

impl ModuleRegistry {
    /// Build the registry, reading the enabled list from `file`
    ///
    /// A missing file means nothing is enabled. A file that is not a JSON
    /// array of strings is a configuration error.
    pub fn load(file: impl Into<PathBuf>, modules: Vec<Arc<dyn OrderHook>>) -> ServiceResult<Self> {
        let file = file.into();
        let enabled = read_enabled(&file)?;
        for id in &enabled {
            if !modules.iter().any(|m| m.id() == id) {
                tracing::warn!(module = %id, "Enabled module is not registered, ignoring");
            }
        }
        tracing::info!(
            registered = modules.len(),
            enabled = enabled.len(),
            file = %file.display(),
            "Module registry loaded"
        );
        Ok(Self {
            modules,
            enabled: RwLock::new(enabled),
            writer: tokio::sync::Mutex::new(()),
            file,
        })
    }

    pub fn list(&self) -> Vec<ModuleInfo> {
        let enabled = self.enabled.read();
        self.modules
            .iter()
            .map(|m| ModuleInfo {
                id: m.id(),
                name: m.name(),
                description: m.description(),
                enabled: enabled.iter().any(|e| e == m.id()),
            })
            .collect()
    }

    /// Enabled ids in file order
    pub fn enabled_ids(&self) -> Vec<String> {
        self.enabled.read().clone()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.read().iter().any(|e| e == id)
    }

    pub async fn enable(&self, id: &str) -> ServiceResult<()> {
        self.ensure_registered(id)?;
        let _writer = self.writer.lock().await;
        let mut next = self.enabled_ids();
        if next.iter().any(|e| e == id) {
            return Ok(());
        }
        next.push(id.to_string());
        write_enabled(&self.file, &next).await?;
        *self.enabled.write() = next;
        tracing::info!(module = %id, "Module enabled");
        Ok(())
    }

    pub async fn disable(&self, id: &str) -> ServiceResult<()> {
        self.ensure_registered(id)?;
        let _writer = self.writer.lock().await;
        let current = self.enabled_ids();
        if !current.iter().any(|e| e == id) {
            return Ok(());
        }
        let next: Vec<String> = current.into_iter().filter(|e| e != id).collect();
        write_enabled(&self.file, &next).await?;
        *self.enabled.write() = next;
        tracing::info!(module = %id, "Module disabled");
        Ok(())
    }

    /// Run `on_order_created` on every enabled module, in order
    pub async fn dispatch_order_created(&self, order: &OrderDetail) {
        for module in self.active() {
            if let Err(e) = module.on_order_created(order).await {
                tracing::warn!(
                    module = module.id(),
                    order_id = order.order.id,
                    error = %e,
                    "Module hook failed"
                );
            }
        }
    }

    fn active(&self) -> Vec<Arc<dyn OrderHook>> {
        let enabled = self.enabled.read();
        enabled
            .iter()
            .filter_map(|id| self.modules.iter().find(|m| m.id() == id).cloned())
            .collect()
    }

    fn ensure_registered(&self, id: &str) -> Result<(), AppError> {
        if self.modules.iter().any(|m| m.id() == id) {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::ModuleNotFound).with_detail("module", id))
        }
    }
}

fn read_enabled(file: &Path) -> ServiceResult<Vec<String>> {
    let raw = match std::fs::read_to_string(file) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(config_error(file, e).into()),
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<String>>(&raw).map_err(|e| {
        AppError::with_message(
            ErrorCode::ConfigError,
            format!("{} is not a JSON array of module ids: {e}", file.display()),
        )
        .into()
    })
}

/// Write to a sibling temp file, then rename over the target
async fn write_enabled(file: &Path, enabled: &[String]) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(enabled).map_err(|e| config_error(file, e))?;
    let tmp = file.with_extension("json.tmp");
    tokio::fs::write(&tmp, json)
        .await
        .map_err(|e| config_error(&tmp, e))?;
    tokio::fs::rename(&tmp, file)
        .await
        .map_err(|e| config_error(file, e))?;
    Ok(())
}

fn config_error(file: &Path, e: impl std::fmt::Display) -> AppError {
    tracing::error!(file = %file.display(), error = %e, "Module file I/O failed");
    AppError::with_message(
        ErrorCode::ConfigError,
        format!("Cannot update module settings: {}", file.display()),
    )
}
