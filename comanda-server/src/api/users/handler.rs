//! Users API Handlers
//!
//! Registration and password lifecycle (change, recover, reset)

use chrono::Utc;

use axum::{
    Json,
    extract::{Path, State},
};

use shared::ApiResponse;
use shared::client::TokenResponse;

use crate::AppError;
use crate::auth::{ANY_AUTHENTICATED, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{PasswordChange, PasswordReset, RecoverRequest, User, UserCreate};
use crate::db::repository::UserRepository;
use crate::utils::validation::validate_payload;

/// POST /api/users - register a new account
///
/// Creates a Pending user and fires the confirmation mail. The optional
/// role field defaults to `user`.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    validate_payload(&payload)?;

    let repo = UserRepository::new(state.get_db());
    let user = repo.create(payload).await?;

    if let Some(code) = user.confirmation_code.as_deref() {
        state.mailer.send_confirmation(&user.name, &user.email, code);
    }

    tracing::info!(email = %user.email, role = %user.role, "User registered");

    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Please confirm your account",
    )))
}

/// POST /api/users/password - change own password
///
/// Requires the current password; re-issues a token on success.
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PasswordChange>,
) -> Result<Json<TokenResponse>, AppError> {
    user.authorize(ANY_AUTHENTICATED)?;
    validate_payload(&payload)?;

    let repo = UserRepository::new(state.get_db());
    let current = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let password_valid = current
        .verify_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        return Err(AppError::invalid_credentials());
    }

    let hash_pass = User::hash_password(&payload.new_password)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    let updated = repo.update_password(&user.id, hash_pass).await?;

    let user_id = updated
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, updated.role)
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, "Password changed");

    Ok(Json(TokenResponse { token }))
}

/// POST /api/users/recover - request a password reset code
pub async fn recover(
    State(state): State<ServerState>,
    Json(payload): Json<RecoverRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    validate_payload(&payload)?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not exists".to_string()))?;

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let updated = repo.issue_reset_code(&user_id).await?;

    if let Some(code) = updated.confirmation_code.as_deref() {
        state
            .mailer
            .send_password_reset(&updated.name, &updated.email, code);
    }

    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Please check your email",
    )))
}

/// POST /api/users/reset/{code} - redeem a reset code
///
/// The code must be unexpired; consuming it moves its validity boundary
/// to now.
pub async fn reset_password(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<PasswordReset>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    validate_payload(&payload)?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_confirmation_code(&code)
        .await?
        .filter(|u| {
            u.reset_password_expires
                .map(|expires| expires > Utc::now())
                .unwrap_or(false)
        })
        .ok_or_else(|| AppError::NotFound("Reset code is invalid or expired".to_string()))?;

    let hash_pass = User::hash_password(&payload.new_password)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    repo.reset_password(&user_id, hash_pass).await?;

    tracing::info!(user_id = %user_id, "Password reset via emailed code");

    Ok(Json(ApiResponse::ok_with_message((), "Password changed")))
}
