use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::database::{DatabaseError, FeatureRepository, FeatureStore};
use crate::handlers::{dashboard, features, stats, system};

/// Shared handler state. Holds the store factory, never a live session.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FeatureStore>,
    pub api: ApiConfig,
}

impl AppState {
    pub fn new(store: impl FeatureStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            api: ApiConfig::default(),
        }
    }

    pub fn with_api_config(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Repository over a fresh session, released when the repository drops
    pub async fn repository(&self) -> Result<FeatureRepository, DatabaseError> {
        FeatureRepository::open(self.store.as_ref()).await
    }
}

pub fn app(state: AppState) -> Router {
    let body_limit = state.api.max_request_size_bytes;

    Router::new()
        // Service
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Features
        .merge(feature_routes())
        .route("/stats", get(stats::get))
        .route("/dashboard", get(dashboard::get))
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn feature_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/features",
            get(features::features_get).post(features::features_post),
        )
        .route("/features/:id", delete(features::feature_delete))
}
