use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::manager::DatabaseError;
use super::models::{FeatureRow, NewFeature};
use super::store::{FeatureSession, FeatureStore};

/// In-process feature store with the same contract as the PostGIS one:
/// ids start at 1, only ever grow and are never handed out twice.
///
/// # Examples
///
/// ```
/// use geofeature_api::database::MemoryFeatureStore;
///
/// let store = MemoryFeatureStore::new();
/// store.close();
/// assert!(store.is_closed());
/// ```
#[derive(Clone, Default)]
pub struct MemoryFeatureStore {
    state: Arc<Mutex<MemoryState>>,
    closed: Arc<AtomicBool>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<i32, FeatureRow>,
}

impl MemoryFeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every new session from now on, as a store that went away would
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), DatabaseError> {
        if self.is_closed() {
            return Err(DatabaseError::Unavailable("memory store is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FeatureStore for MemoryFeatureStore {
    async fn session(&self) -> Result<Box<dyn FeatureSession>, DatabaseError> {
        self.ensure_open()?;
        Ok(Box::new(MemorySession {
            state: Arc::clone(&self.state),
        }))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.ensure_open()
    }
}

pub struct MemorySession {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl FeatureSession for MemorySession {
    async fn insert(&mut self, feature: NewFeature) -> Result<i32, DatabaseError> {
        let geometry = serde_json::to_string(&feature.geometry.to_geojson())?;
        let mut state = self.state.lock().await;
        state.last_id += 1;
        let id = state.last_id;
        state.rows.insert(
            id,
            FeatureRow {
                id,
                geom_type: feature.kind.as_str().to_string(),
                geometry,
            },
        );
        Ok(id)
    }

    async fn select_all(&mut self) -> Result<Vec<FeatureRow>, DatabaseError> {
        let state = self.state.lock().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn select_by_id(&mut self, id: i32) -> Result<Option<FeatureRow>, DatabaseError> {
        let state = self.state.lock().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn delete_by_id(&mut self, id: i32) -> Result<u64, DatabaseError> {
        let mut state = self.state.lock().await;
        Ok(state.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn count_where_kind(&mut self, kind: &str) -> Result<i64, DatabaseError> {
        let state = self.state.lock().await;
        let count = state.rows.values().filter(|row| row.geom_type == kind).count();
        Ok(count as i64)
    }

    async fn select_recent(&mut self, limit: u32) -> Result<Vec<FeatureRow>, DatabaseError> {
        let state = self.state.lock().await;
        Ok(state.rows.values().rev().take(limit as usize).cloned().collect())
    }
}
