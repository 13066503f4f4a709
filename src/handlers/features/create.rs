use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::app::AppState;
use crate::geometry::GeometryKind;
use crate::middleware::{ApiResponse, ApiResult};

/// Body of `POST /features`. `geometry` must be a JSON object and `type`
/// one of the three kinds, or the request is rejected before the store is
/// touched.
#[derive(Debug, Deserialize)]
pub struct CreateFeatureRequest {
    pub geometry: Map<String, Value>,
    #[serde(rename = "type")]
    pub kind: GeometryKind,
}

#[derive(Debug, Serialize)]
pub struct CreatedFeature {
    pub id: i32,
}

/// POST /features - Store one geometry
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<CreateFeatureRequest>, JsonRejection>,
) -> ApiResult<CreatedFeature> {
    let Json(request) = payload?;
    let geometry = Value::Object(request.geometry);

    let mut repository = state.repository().await?;
    let id = repository.create(&geometry, request.kind).await?;

    Ok(ApiResponse::success(CreatedFeature { id }))
}
