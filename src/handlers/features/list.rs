use axum::extract::State;
use geojson::FeatureCollection;

use crate::api::format::records_to_feature_collection;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /features - Every stored feature as a GeoJSON FeatureCollection
pub async fn get(State(state): State<AppState>) -> ApiResult<FeatureCollection> {
    let mut repository = state.repository().await?;
    let records = repository.list_all().await?;

    Ok(ApiResponse::success(records_to_feature_collection(&records)))
}
