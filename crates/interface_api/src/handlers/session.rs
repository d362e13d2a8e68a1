//! Session login handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::create_token;
use crate::dto::ApiJson;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginFailure {
    pub success: bool,
    pub error: String,
}

/// Checks the administrator credentials and issues a session token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let (Some(username), Some(password)) = (
        request.username.filter(|u| !u.is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    };

    let config = &state.config;
    if username != config.admin_username || password != config.admin_password {
        warn!(username = %username, "Rejected login");
        let body = LoginFailure {
            success: false,
            error: "Invalid credentials".to_string(),
        };
        return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    }

    let token = create_token(&username, &config.jwt_secret, config.jwt_expiration_secs)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!(username = %username, "Login succeeded");

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
    })
    .into_response())
}
