//! Server binary: reads config from the environment (and `.env`), connects to
//! PostgreSQL, mounts common routes and /api.

use academic_records::{app, AppConfig, AppState, Db, PgStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("academic_records=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let db = match Db::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, host = %config.database.host_for_logs(), "could not connect to database");
            return Err(e.into());
        }
    };
    let state = AppState::new(Arc::new(PgStore::new(db)));
    let router = app(state, config.server.body_limit_bytes);

    let listener = TcpListener::bind(config.server.listen_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
