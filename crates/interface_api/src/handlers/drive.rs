//! Drive export and authorization handlers

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use infra_export::RemoteFile;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DriveStatusResponse {
    pub authorized: bool,
}

#[derive(Debug, Serialize)]
pub struct DriveUploadResponse {
    pub success: bool,
    pub file: RemoteFile,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// Reports whether Drive credentials are stored
pub async fn drive_status(
    State(state): State<AppState>,
) -> Result<Json<DriveStatusResponse>, ApiError> {
    let authorized = state.export.is_authorized().await?;
    Ok(Json(DriveStatusResponse { authorized }))
}

/// Uploads a snapshot now and waits for the outcome
pub async fn drive_upload(
    State(state): State<AppState>,
) -> Result<Json<DriveUploadResponse>, ApiError> {
    let file = state.export.export_now().await?;
    Ok(Json(DriveUploadResponse { success: true, file }))
}

/// Redirects to the consent screen
pub async fn google_auth(State(state): State<AppState>) -> Result<Response, ApiError> {
    let url = state.export.authorize_url()?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
}

/// Completes the consent round trip
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        warn!("OAuth callback without code");
        return (StatusCode::BAD_REQUEST, "Missing authorization code").into_response();
    };

    match state.export.complete_authorization(&code).await {
        Ok(()) => "Google Drive authorization successful. You can close this window.".into_response(),
        Err(e) => {
            error!(error = %e, "OAuth callback failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Authorization failed").into_response()
        }
    }
}
