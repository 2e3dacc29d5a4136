pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::{handlers as auth, session::page_guard};
use crate::flows::{handlers as flows, live};
use crate::pages::handlers as pages;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Page views sit behind the session redirect policy.
    let page_routes = Router::new()
        .route("/", get(pages::handle_home))
        .route("/services", get(pages::handle_listing))
        .route("/services/:id", get(pages::handle_profile))
        .route("/login", get(pages::handle_login_page))
        .route("/signup", get(pages::handle_signup_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), page_guard));

    Router::new()
        .merge(page_routes)
        .route("/health", get(health::health_handler))
        // Flows
        .route("/api/v1/suggestions", post(flows::handle_suggest))
        .route(
            "/api/v1/suggestions/live",
            get(live::handle_live_suggestions),
        )
        .route("/api/v1/recommendations", post(flows::handle_recommend))
        // Session
        .route(
            "/api/v1/auth/session",
            post(auth::handle_sign_in).delete(auth::handle_sign_out),
        )
        .route("/api/v1/auth/me", get(auth::handle_me))
        .with_state(state)
}
