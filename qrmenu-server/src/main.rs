//! qrmenu-server: restaurant administration and QR ordering API

use std::time::Duration;

use qrmenu_server::util::now_millis;
use qrmenu_server::{AppState, BoxError, Config, api};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Config::from_env()?;
    tracing::info!("Starting qrmenu-server (env: {})", config.environment);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let state = AppState::new(config).await?;

    // Periodic cleanup of idle sessions and stale login attempts
    let auth = state.auth.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match auth.cleanup(now_millis()).await {
                Ok((sessions, attempts)) if sessions > 0 || attempts > 0 => {
                    tracing::debug!(sessions, attempts, "Expired auth state purged");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Auth cleanup failed"),
            }
        }
    });

    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("qrmenu-server HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("qrmenu-server stopped");
    Ok(())
}

/// `RUST_LOG` filtering; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "qrmenu_server=info,tower_http=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
