use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{FeatureRow, NewFeature};

/// Factory for scoped store sessions.
///
/// Each request opens its own session and drops it when done; dropping
/// releases the underlying connection whatever the outcome was.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    async fn session(&self) -> Result<Box<dyn FeatureSession>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Operations available on one store session
#[async_trait]
pub trait FeatureSession: Send {
    /// Insert a row and return the id the store assigned
    async fn insert(&mut self, feature: NewFeature) -> Result<i32, DatabaseError>;

    async fn select_all(&mut self) -> Result<Vec<FeatureRow>, DatabaseError>;

    async fn select_by_id(&mut self, id: i32) -> Result<Option<FeatureRow>, DatabaseError>;

    /// Number of rows removed (0 or 1)
    async fn delete_by_id(&mut self, id: i32) -> Result<u64, DatabaseError>;

    /// Rows whose `geom_type` equals `kind` exactly
    async fn count_where_kind(&mut self, kind: &str) -> Result<i64, DatabaseError>;

    /// Up to `limit` rows, newest id first
    async fn select_recent(&mut self, limit: u32) -> Result<Vec<FeatureRow>, DatabaseError>;
}
