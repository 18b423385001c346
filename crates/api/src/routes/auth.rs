//! Authentication route handlers.
//!
//! Registration and login resolve accounts through the auth service and
//! establish the session; all other routes read the resolved identity via
//! the `RequireAuth` extractor.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new account and log it in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current).await?;

    Ok((StatusCode::CREATED, Json(current)))
}

/// Login with email and password.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&payload.email, &payload.password).await?;

    // Rotate the session id on privilege change
    session.cycle_id().await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current).await?;

    Ok(Json(current))
}

/// Logout, clearing the session.
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;
    session.flush().await?;

    Ok(StatusCode::NO_CONTENT)
}
