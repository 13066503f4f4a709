use axum::extract::{rejection::PathRejection, Path, State};
use serde::Serialize;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct DeletedFeature {
    pub status: &'static str,
}

/// DELETE /features/:id - Permanently remove one feature
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<DeletedFeature> {
    let Path(id) = id?;

    let mut repository = state.repository().await?;
    repository.delete_by_id(id).await?;

    Ok(ApiResponse::success(DeletedFeature { status: "deleted" }))
}
