use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::{AlertDto, ApiError, ApiResponse, AppState};
use crate::db::NewAlert;

/// The read endpoint never pages; it returns at most this many rows,
/// newest first.
const RECENT_ALERTS_LIMIT: u64 = 50;

/// Insertable alert fields. Everything is optional and nothing is checked
/// here; a row the store rejects comes back to the caller as a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateAlertRequest {
    pub business_id: Option<i32>,
    pub alert_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AlertDto>>>, ApiError> {
    let rows = state
        .store()
        .list_alerts_with_business(RECENT_ALERTS_LIMIT)
        .await?;

    let dtos: Vec<AlertDto> = rows.into_iter().map(AlertDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAlertRequest>,
) -> Result<Json<ApiResponse<Vec<AlertDto>>>, ApiError> {
    let inserted = state
        .store()
        .create_alert(NewAlert {
            business_id: payload.business_id,
            alert_type: payload.alert_type,
            title: payload.title,
            description: payload.description,
        })
        .await?;

    Ok(Json(ApiResponse::success(vec![AlertDto::from(inserted)])))
}
