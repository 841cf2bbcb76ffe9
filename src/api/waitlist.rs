use axum::{Json, extract::State};
use sea_orm::{DbErr, SqlErr};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState, WaitlistEntryDto};
use crate::db::NewSignup;

/// Exactly the three fields the endpoint projects out of the body; any
/// other keys a client sends are dropped on the floor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JoinWaitlistRequest {
    pub email: Option<String>,
    pub market_interest: Option<String>,
    pub business_type: Option<String>,
}

pub async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<JoinWaitlistRequest>,
) -> Result<Json<ApiResponse<Vec<WaitlistEntryDto>>>, ApiError> {
    let signup = NewSignup {
        email: payload.email,
        market_interest: payload.market_interest,
        business_type: payload.business_type,
    };

    match state.store().add_waitlist_entry(signup).await {
        Ok(entry) => Ok(Json(ApiResponse::with_message(
            vec![WaitlistEntryDto::from(entry)],
            "Added to waitlist",
        ))),
        Err(err) => {
            // A repeat signup is not a failure; everything else is.
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                info!("Duplicate waitlist signup ignored");
                return Ok(Json(ApiResponse::message_only("Already on waitlist")));
            }

            match err {
                DbErr::RecordNotFound(msg) => Err(ApiError::internal(msg)),
                other => Err(ApiError::store(other.to_string())),
            }
        }
    }
}

pub async fn list_waitlist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<WaitlistEntryDto>>>, ApiError> {
    let rows = state.store().list_waitlist().await?;
    let dtos: Vec<WaitlistEntryDto> = rows.into_iter().map(WaitlistEntryDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
