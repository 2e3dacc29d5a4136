use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use tracing::{debug, warn};

use crate::auth::{guard, GuardDecision, SessionState};
use crate::models::UserProfile;

pub const SESSION_COOKIE: &str = "locallink_session";

impl SessionState {
    /// Reads the signed session cookie. Missing, tampered, or unreadable cookies
    /// all mean signed out.
    pub fn from_jar(jar: &SignedCookieJar) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return SessionState::Unauthenticated;
        };
        match serde_json::from_str::<UserProfile>(cookie.value()) {
            Ok(user) => SessionState::Authenticated(user),
            Err(e) => {
                warn!("Discarding unreadable session cookie: {e}");
                SessionState::Unauthenticated
            }
        }
    }
}

pub fn session_cookie(user: &UserProfile) -> Result<Cookie<'static>, serde_json::Error> {
    let value = serde_json::to_string(user)?;
    Ok(Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build())
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Page middleware: applies the redirect policy and hands the resolved
/// `SessionState` to the page handler as a request extension.
pub async fn page_guard(jar: SignedCookieJar, mut request: Request, next: Next) -> Response {
    let session = SessionState::from_jar(&jar);
    let path = request.uri().path().to_string();

    match guard(&session, &path) {
        GuardDecision::Allow => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GuardDecision::Redirect(to) => {
            debug!("Redirecting {path} to {to}");
            Redirect::to(to).into_response()
        }
        GuardDecision::Wait => StatusCode::NO_CONTENT.into_response(),
    }
}
