use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use tracing::debug;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{FeatureRow, NewFeature};
use super::store::{FeatureSession, FeatureStore};

// PostGIS rounds to 9 decimals by default; 15 is the most it will emit.
const SELECT_COLUMNS: &str = "SELECT id, geom_type, ST_AsGeoJSON(geom, 15) AS geometry FROM features";

/// PostGIS-backed feature store
#[derive(Clone)]
pub struct PgFeatureStore {
    pool: PgPool,
}

impl PgFeatureStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureStore for PgFeatureStore {
    async fn session(&self) -> Result<Box<dyn FeatureSession>, DatabaseError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgSession { conn }))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// One pooled connection, handed back to the pool on drop
pub struct PgSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl FeatureSession for PgSession {
    async fn insert(&mut self, feature: NewFeature) -> Result<i32, DatabaseError> {
        let geojson = serde_json::to_string(&feature.geometry.to_geojson())?;
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO features (geom, geom_type) \
             VALUES (ST_SetSRID(ST_GeomFromGeoJSON($1), $2), $3) \
             RETURNING id",
        )
        .bind(&geojson)
        .bind(feature.srid)
        .bind(feature.kind.as_str())
        .fetch_one(&mut *self.conn)
        .await?;
        debug!(id, kind = %feature.kind, "inserted feature row");
        Ok(id)
    }

    async fn select_all(&mut self) -> Result<Vec<FeatureRow>, DatabaseError> {
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let rows = sqlx::query_as::<_, FeatureRow>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn select_by_id(&mut self, id: i32) -> Result<Option<FeatureRow>, DatabaseError> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, FeatureRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&mut self, id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM features WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count_where_kind(&mut self, kind: &str) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM features WHERE geom_type = $1")
            .bind(kind)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    async fn select_recent(&mut self, limit: u32) -> Result<Vec<FeatureRow>, DatabaseError> {
        let sql = format!("{} ORDER BY id DESC LIMIT $1", SELECT_COLUMNS);
        let rows = sqlx::query_as::<_, FeatureRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }
}
