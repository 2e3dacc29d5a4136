//! Session state and the path-based redirect policy.
//!
//! Identity itself is owned by a managed provider; this module only tracks
//! who the current request belongs to and where they may go.

pub mod handlers;
pub mod session;

use crate::models::UserProfile;

/// Paths reachable only while signed out.
pub const PUBLIC_PATHS: [&str; 2] = ["/login", "/signup"];
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    /// The identity check has not resolved yet.
    Loading,
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Render nothing until the session resolves.
    Wait,
    Redirect(&'static str),
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Signed-in users are sent home from login/signup; signed-out users are sent
/// to login from everything else.
pub fn guard(session: &SessionState, path: &str) -> GuardDecision {
    let public = is_public_path(path);
    match session {
        SessionState::Loading => GuardDecision::Wait,
        SessionState::Authenticated(_) if public => GuardDecision::Redirect(HOME_PATH),
        SessionState::Unauthenticated if !public => GuardDecision::Redirect(LOGIN_PATH),
        _ => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::user;

    #[test]
    fn test_loading_waits_everywhere() {
        assert_eq!(guard(&SessionState::Loading, "/"), GuardDecision::Wait);
        assert_eq!(guard(&SessionState::Loading, "/login"), GuardDecision::Wait);
    }

    #[test]
    fn test_signed_out_users_go_to_login() {
        let session = SessionState::Unauthenticated;
        assert_eq!(guard(&session, "/"), GuardDecision::Redirect("/login"));
        assert_eq!(guard(&session, "/services/p1"), GuardDecision::Redirect("/login"));
        assert_eq!(guard(&session, "/login"), GuardDecision::Allow);
        assert_eq!(guard(&session, "/signup"), GuardDecision::Allow);
    }

    #[test]
    fn test_signed_in_users_leave_login_and_signup() {
        let session = SessionState::Authenticated(user("u1"));
        assert_eq!(guard(&session, "/login"), GuardDecision::Redirect("/"));
        assert_eq!(guard(&session, "/signup"), GuardDecision::Redirect("/"));
        assert_eq!(guard(&session, "/services"), GuardDecision::Allow);
    }

    #[test]
    fn test_public_paths_match_exactly() {
        assert!(is_public_path("/login"));
        assert!(!is_public_path("/login/extra"));
        assert!(!is_public_path("/Login"));
    }
}
