//! Session endpoints. Credentials are checked by the managed identity
//! provider; these handlers only record the resulting identity.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Serialize;

use crate::auth::session::{expired_session_cookie, session_cookie};
use crate::auth::SessionState;
use crate::errors::AppError;
use crate::models::UserProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserProfile,
    /// True when this sign-in created the profile record.
    pub created: bool,
}

/// POST /api/v1/auth/session
pub async fn handle_sign_in(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(profile): Json<UserProfile>,
) -> Result<(SignedCookieJar, Json<SessionResponse>), AppError> {
    if profile.uid.trim().is_empty() {
        return Err(AppError::Validation("uid cannot be empty".to_string()));
    }

    let created = state.directory.ensure_user_profile(&profile).await;
    let cookie = session_cookie(&profile)
        .map_err(|e| AppError::Validation(format!("Unencodable profile: {e}")))?;

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            user: profile,
            created,
        }),
    ))
}

/// DELETE /api/v1/auth/session
pub async fn handle_sign_out(jar: SignedCookieJar) -> (SignedCookieJar, StatusCode) {
    (jar.remove(expired_session_cookie()), StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(jar: SignedCookieJar) -> Result<Json<UserProfile>, AppError> {
    match SessionState::from_jar(&jar) {
        SessionState::Authenticated(user) => Ok(Json(user)),
        _ => Err(AppError::Unauthorized),
    }
}
