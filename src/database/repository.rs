use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::database::manager::DatabaseError;
use crate::database::models::{FeatureRow, NewFeature};
use crate::database::store::{FeatureSession, FeatureStore};
use crate::geometry::{self, FeatureGeometry, GeometryError, GeometryKind, WGS84_SRID};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),

    #[error("Feature {0} not found")]
    NotFound(i32),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// A stored feature as exposed to callers
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub id: i32,
    /// The kind recorded at creation time, verbatim
    pub kind: String,
    pub geometry: geojson::Geometry,
}

impl TryFrom<FeatureRow> for FeatureRecord {
    type Error = DatabaseError;

    fn try_from(row: FeatureRow) -> Result<Self, Self::Error> {
        let geometry = geometry::decode(&row.geometry)
            .map_err(|e| DatabaseError::Decode(format!("feature {}: {}", row.id, e)))?;
        Ok(Self {
            id: row.id,
            kind: row.geom_type,
            geometry,
        })
    }
}

/// Per-kind feature counts. Always carries all three kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub points: i64,
    pub lines: i64,
    pub polygons: i64,
}

impl FeatureStats {
    pub fn get(&self, kind: GeometryKind) -> i64 {
        match kind {
            GeometryKind::Point => self.points,
            GeometryKind::LineString => self.lines,
            GeometryKind::Polygon => self.polygons,
        }
    }

    fn set(&mut self, kind: GeometryKind, count: i64) {
        match kind {
            GeometryKind::Point => self.points = count,
            GeometryKind::LineString => self.lines = count,
            GeometryKind::Polygon => self.polygons = count,
        }
    }

    pub fn total(&self) -> i64 {
        self.points + self.lines + self.polygons
    }
}

/// Maps feature operations onto a single store session. Dropping the
/// repository drops the session.
pub struct FeatureRepository {
    session: Box<dyn FeatureSession>,
}

impl FeatureRepository {
    pub fn new(session: Box<dyn FeatureSession>) -> Self {
        Self { session }
    }

    /// Open a fresh session on `store`
    pub async fn open(store: &dyn FeatureStore) -> Result<Self, DatabaseError> {
        Ok(Self::new(store.session().await?))
    }

    /// Parse `payload` and store it under the caller-supplied `kind`.
    ///
    /// `kind` is stored as given; it is not checked against the payload's own
    /// `type` member.
    pub async fn create(&mut self, payload: &Value, kind: GeometryKind) -> Result<i32, RepositoryError> {
        let geometry = FeatureGeometry::parse(payload)?;
        if geometry.kind() != kind {
            warn!(
                declared = %kind,
                actual = %geometry.kind(),
                "feature kind does not match its geometry; storing declared kind"
            );
        }

        let id = self
            .session
            .insert(NewFeature {
                geometry,
                srid: WGS84_SRID,
                kind,
            })
            .await?;
        info!(id, kind = %kind, "feature created");
        Ok(id)
    }

    pub async fn list_all(&mut self) -> Result<Vec<FeatureRecord>, RepositoryError> {
        let rows = self.session.select_all().await?;
        debug!(count = rows.len(), "listing features");
        Self::records(rows)
    }

    /// Hard delete. A second delete of the same id is `NotFound`.
    pub async fn delete_by_id(&mut self, id: i32) -> Result<(), RepositoryError> {
        if self.session.select_by_id(id).await?.is_none() {
            return Err(RepositoryError::NotFound(id));
        }
        // Someone else may have removed it in between
        if self.session.delete_by_id(id).await? == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        info!(id, "feature deleted");
        Ok(())
    }

    pub async fn count_by_kind(&mut self) -> Result<FeatureStats, RepositoryError> {
        let mut stats = FeatureStats::default();
        for kind in GeometryKind::ALL {
            let count = self.session.count_where_kind(kind.as_str()).await?;
            stats.set(kind, count);
        }
        Ok(stats)
    }

    /// Up to `limit` features, newest first
    pub async fn recent_features(&mut self, limit: u32) -> Result<Vec<FeatureRecord>, RepositoryError> {
        let rows = self.session.select_recent(limit).await?;
        Self::records(rows)
    }

    fn records(rows: Vec<FeatureRow>) -> Result<Vec<FeatureRecord>, RepositoryError> {
        rows.into_iter()
            .map(|row| FeatureRecord::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}
