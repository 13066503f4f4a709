use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - Service information
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "GeoFeature API",
        "version": version,
        "description": "Minimal geospatial feature store (GeoJSON over HTTP, PostGIS storage)",
        "endpoints": {
            "features": "GET, POST /features",
            "feature": "DELETE /features/:id",
            "stats": "GET /stats",
            "dashboard": "GET /dashboard (HTML)",
            "health": "GET /health",
        }
    }))
}

/// GET /health - Store connectivity check
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
