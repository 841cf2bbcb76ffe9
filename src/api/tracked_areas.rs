use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, TrackedAreaDto};
use crate::db::NewTrackedArea;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateAreaRequest {
    pub name: Option<String>,
    pub location: Option<String>,
}

pub async fn list_areas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TrackedAreaDto>>>, ApiError> {
    let rows = state.store().list_tracked_areas().await?;
    let dtos: Vec<TrackedAreaDto> = rows.into_iter().map(TrackedAreaDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn create_area(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAreaRequest>,
) -> Result<Json<ApiResponse<Vec<TrackedAreaDto>>>, ApiError> {
    let inserted = state
        .store()
        .create_tracked_area(NewTrackedArea {
            name: payload.name,
            location: payload.location,
        })
        .await?;

    Ok(Json(ApiResponse::success(vec![TrackedAreaDto::from(
        inserted,
    )])))
}
