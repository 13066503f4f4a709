use axum::extract::State;

use crate::app::AppState;
use crate::database::FeatureStats;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /stats - Feature counts per kind
pub async fn get(State(state): State<AppState>) -> ApiResult<FeatureStats> {
    let mut repository = state.repository().await?;
    let stats = repository.count_by_kind().await?;

    Ok(ApiResponse::success(stats))
}
