//! Authentication Handlers
//!
//! Handles login, current-user lookup and account activation

use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
};

use shared::ApiResponse;
use shared::client::{LoginRequest, LoginResponse, UserInfo};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserStatus;
use crate::db::repository::UserRepository;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth - login
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let repo = UserRepository::new(state.get_db());

    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    if user.status == UserStatus::Pending {
        return Err(AppError::Forbidden(
            "Account has not been activated".to_string(),
        ));
    }

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(email = %user.email, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    // Generate JWT token
    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, user.role)
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth - current user info
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<UserInfo>, AppError> {
    let repo = UserRepository::new(state.get_db());
    let current = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(current.into()))
}

/// GET /api/auth/confirm/{code} - activate a pending account
pub async fn confirm(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .activate_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound("Confirmation code not found".to_string()))?;

    tracing::info!(email = %user.email, "Account activated");

    Ok(Json(ApiResponse::ok_with_message((), "Account activated")))
}
