//! Profile route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::auth::{RequireAuth, set_current_user};
use crate::models::CurrentUser;
use crate::models::profile::{ChangePassword, ProfileChanges};
use crate::services::auth::AuthService;
use crate::services::profile::ProfileService;
use crate::state::AppState;

/// Merged account + profile view.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let profiles = ProfileService::new(state.pool());
    let view = profiles.get(user.id).await?;

    Ok(Json(view))
}

/// Partially update the profile; username/email changes are checked for
/// uniqueness and refreshed in the session.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<ProfileChanges>,
) -> Result<impl IntoResponse> {
    let profiles = ProfileService::new(state.pool());
    let view = profiles.update(user.id, payload).await?;

    // Keep the session identity in sync with the account row
    let current = CurrentUser {
        id: view.user_id,
        username: view.username.clone(),
        email: view.email.clone(),
    };
    set_current_user(&session, &current).await?;

    Ok(Json(view))
}

/// Change the account password after verifying the current one.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<ChangePassword>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    auth.change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
