use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::warn;

use super::{ApiError, ApiResponse, AppState};
use crate::models::UserProfile;
use crate::services::SignIn;

pub const SESSION_UID_KEY: &str = "uid";

/// Uid of the signed-in user, or `Unauthorized`.
pub async fn require_uid(session: &Session) -> Result<String, ApiError> {
    session
        .get::<String>(SESSION_UID_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session load failed: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))
}

/// `POST /api/auth/session`
///
/// Establishes a session for an identity already verified by the external
/// provider. Creates the user document on first sign-in; that write is
/// best-effort and never blocks the sign-in itself.
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(identity): Json<SignIn>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    if identity.uid.trim().is_empty() {
        return Err(ApiError::validation("uid cannot be empty"));
    }

    let context = state.shared.session_service.sign_in(&identity).await?;

    session
        .insert(SESSION_UID_KEY, context.user.uid.clone())
        .await
        .map_err(|e| ApiError::internal(format!("Session store failed: {e}")))?;

    Ok(Json(ApiResponse::success(context.user)))
}

/// `DELETE /api/auth/session`
///
/// Tears down the favorites feed and drops the session. Cleanup failures
/// are logged and swallowed; sign-out always succeeds from the caller's
/// point of view.
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Json<ApiResponse<()>> {
    match session.get::<String>(SESSION_UID_KEY).await {
        Ok(Some(uid)) => state.shared.session_service.sign_out(&uid).await,
        Ok(None) => {}
        Err(e) => warn!("Sign-out session load failed: {e}"),
    }

    if let Err(e) = session.flush().await {
        warn!("Sign-out session flush failed: {e}");
    }

    Json(ApiResponse::success(()))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let uid = require_uid(&session).await?;

    let user = state
        .shared
        .store
        .get_user(&uid)
        .await?
        .ok_or_else(|| ApiError::not_found("User", &uid))?;

    Ok(Json(ApiResponse::success(user)))
}
