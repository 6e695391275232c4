use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::middleware::AuthenticatedUser;
use crate::error::{ApiError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub logged_in_as: String,
}

/// POST /api/login
///
/// Compares the submitted pair against the configured admin credentials and
/// issues a time-limited bearer token on success.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (username, password) = match (payload.username, payload.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing username or password".to_string(),
            ));
        }
    };

    if username != state.config.admin_username || password != state.config.admin_password {
        warn!(username, "Rejected login attempt");
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = state.jwt_service.issue_token(&username)?;
    info!(username, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// GET /api/protected
///
/// Requires a valid bearer token; echoes the token's subject.
pub async fn protected(user: AuthenticatedUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        logged_in_as: user.0.sub,
    })
}
