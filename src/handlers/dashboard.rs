use axum::{extract::State, response::Html};

use crate::app::AppState;
use crate::dashboard;
use crate::error::ApiError;

/// GET /dashboard - HTML summary with counts and the most recent features
pub async fn get(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let mut repository = state.repository().await?;
    let stats = repository.count_by_kind().await?;
    let recent = repository.recent_features(state.api.dashboard_recent_limit).await?;
    drop(repository);

    Ok(Html(dashboard::render(&stats, &recent)))
}
