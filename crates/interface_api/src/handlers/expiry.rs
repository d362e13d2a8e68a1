//! Expiry report handler

use axum::{extract::State, Json};

use crate::dto::clients::ExpiryResponse;
use crate::error::ApiError;
use crate::AppState;

/// Clients with an expiry countdown, soonest first
pub async fn insurance_expiry(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpiryResponse>>, ApiError> {
    let report = state.clients.list_expiring(state.today()).await?;
    Ok(Json(report.into_iter().map(ExpiryResponse::from).collect()))
}
