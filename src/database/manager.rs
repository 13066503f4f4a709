use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the feature store and its connection management
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Feature store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored geometry could not be decoded: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when the store could not be reached at all, as opposed to a
    /// query that reached it and failed.
    pub fn is_unavailable(&self) -> bool {
        match self {
            DatabaseError::Unavailable(_) => true,
            DatabaseError::Sqlx(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

/// Connection bootstrap for the PostGIS-backed store. Holds no state of its
/// own: the pool it builds is owned by whoever asked for it.
pub struct DatabaseManager;

impl DatabaseManager {
    const CREATE_FEATURES_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS features (
            id SERIAL PRIMARY KEY,
            geom geometry(Geometry, 4326) NOT NULL,
            geom_type VARCHAR NOT NULL
        )
    "#;

    const CREATE_KIND_INDEX: &'static str =
        "CREATE INDEX IF NOT EXISTS ix_features_geom_type ON features (geom_type)";

    /// Build a connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let mut options =
            PgConnectOptions::from_str(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Connected to feature store at {}", Self::redact_url(url));
        Ok(pool)
    }

    /// Create the `features` table when it does not exist yet. Never alters
    /// an existing table.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(Self::CREATE_FEATURES_TABLE).execute(pool).await?;
        sqlx::query(Self::CREATE_KIND_INDEX).execute(pool).await?;
        info!("Feature table ready");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Database URL with the password masked, for logging
    pub fn redact_url(raw: &str) -> String {
        match url::Url::parse(raw) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.into()
            }
            Err(_) => "<invalid url>".to_string(),
        }
    }
}
