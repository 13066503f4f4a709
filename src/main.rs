use anyhow::Context;
use tracing_subscriber::EnvFilter;

use geofeature_api::config;
use geofeature_api::database::{DatabaseManager, PgFeatureStore};
use geofeature_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting GeoFeature API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the feature store")?;
    if config.database.ensure_schema {
        DatabaseManager::ensure_schema(&pool)
            .await
            .context("failed to prepare the features table")?;
    }

    let state = AppState::new(PgFeatureStore::new(pool.clone())).with_api_config(config.api.clone());
    let app = app(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("GeoFeature API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Feature store connections closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
