//! Authentication commands

use crate::auth::AuthProvider;
use crate::error::{AppError, Result};
use crate::session::{RouteAccess, UserIdentity};
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tauri::State;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmResetRequest {
    pub oob_code: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserIdentity,
}

fn validate_credentials(request: &CredentialsRequest) -> Result<()> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(AppError::Validation("Valid email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    Ok(())
}

/// Create an account with email and password
#[tauri::command]
pub async fn sign_up(
    state: State<'_, AppState>,
    request: CredentialsRequest,
) -> Result<AuthResponse> {
    tracing::info!("Signup attempt for {}", request.email);

    validate_credentials(&request)?;

    let session = state.auth.sign_up(&request.email, &request.password).await?;
    let user = session.user.clone();
    state.establish_session(session);

    tracing::info!("User {} signed up", user.email);

    Ok(AuthResponse {
        success: true,
        user,
    })
}

/// Login with email and password
#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    request: CredentialsRequest,
) -> Result<AuthResponse> {
    tracing::info!("Login attempt for {}", request.email);

    validate_credentials(&request)?;

    let session = state.auth.sign_in(&request.email, &request.password).await?;
    let user = session.user.clone();
    state.establish_session(session);

    tracing::info!("User {} logged in", user.email);

    Ok(AuthResponse {
        success: true,
        user,
    })
}

/// Login with a Google ID token from the frontend popup flow
#[tauri::command]
pub async fn google_login(
    state: State<'_, AppState>,
    request: GoogleLoginRequest,
) -> Result<AuthResponse> {
    tracing::info!("Google login attempt");

    let session = state.auth.sign_in_with_google(&request.id_token).await?;
    let user = session.user.clone();
    state.establish_session(session);

    Ok(AuthResponse {
        success: true,
        user,
    })
}

/// Logout current user
#[tauri::command]
pub async fn logout(state: State<'_, AppState>) -> Result<()> {
    tracing::info!("User logout");

    state.clear_session();

    Ok(())
}

/// Email a password reset link
#[tauri::command]
pub async fn reset_password(state: State<'_, AppState>, email: String) -> Result<()> {
    tracing::info!("Password reset requested for {}", email);

    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation("Valid email is required".to_string()));
    }

    state.auth.send_password_reset(&email).await
}

/// Complete a password reset with the emailed out-of-band code
#[tauri::command]
pub async fn confirm_password_reset(
    state: State<'_, AppState>,
    request: ConfirmResetRequest,
) -> Result<()> {
    tracing::info!("Password reset confirmation");

    state
        .auth
        .confirm_password_reset(&request.oob_code, &request.new_password)
        .await
}

/// Update the signed-in principal's display name and/or photo
#[tauri::command]
pub async fn update_profile(
    state: State<'_, AppState>,
    request: UpdateProfileRequest,
) -> Result<UserIdentity> {
    let current = state.require_session()?;
    let token = state.require_token()?;

    tracing::info!("Profile update for {}", current.email);

    let mut updated = state
        .auth
        .update_profile(
            &token,
            request.display_name.as_deref(),
            request.photo_url.as_deref(),
        )
        .await?;

    // Providers may omit unchanged fields; keep what we already know
    if updated.email.is_empty() {
        updated.email = current.email;
    }

    state.update_identity(updated.clone());

    Ok(updated)
}

/// Change the signed-in principal's password
#[tauri::command]
pub async fn update_password(state: State<'_, AppState>, new_password: String) -> Result<()> {
    let current = state.require_session()?;
    let token = state.require_token()?;

    tracing::info!("Password update for {}", current.email);

    if new_password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    // The provider rotates tokens on password change
    let session = state.auth.update_password(&token, &new_password).await?;
    state.establish_session(session);

    Ok(())
}

/// Check if a principal is signed in
#[tauri::command]
pub async fn check_session(state: State<'_, AppState>) -> Result<bool> {
    Ok(state.is_authenticated())
}

/// Get the current principal, if any
#[tauri::command]
pub async fn get_current_user(state: State<'_, AppState>) -> Result<Option<UserIdentity>> {
    Ok(state.session_snapshot().principal().cloned())
}

/// Gate a route on the session state machine
#[tauri::command]
pub async fn guard_route(state: State<'_, AppState>, route: String) -> Result<RouteAccess> {
    Ok(crate::session::guard(&state.session_snapshot(), &route))
}
