use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::SessionState;
use crate::errors::AppError;
use crate::models::{Provider, UserProfile};
use crate::pages::{filter_providers, TOP_PROVIDER_COUNT};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    /// False when the directory store is not configured; the client shows a banner.
    pub configured: bool,
    pub user: Option<UserProfile>,
    pub top_providers: Vec<Provider>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub configured: bool,
    pub query: String,
    pub providers: Vec<Provider>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPageView {
    pub page: &'static str,
    pub configured: bool,
}

/// GET /
pub async fn handle_home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionState>,
) -> Json<HomeView> {
    let mut top_providers = state.directory.list_providers().await;
    top_providers.truncate(TOP_PROVIDER_COUNT);

    Json(HomeView {
        configured: state.directory.is_configured(),
        user: session.user().cloned(),
        top_providers,
    })
}

/// GET /services?q=
pub async fn handle_listing(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<ListingView> {
    let providers = filter_providers(state.directory.list_providers().await, &query.q);

    Json(ListingView {
        configured: state.directory.is_configured(),
        query: query.q,
        providers,
    })
}

/// GET /services/:id
pub async fn handle_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Provider>, AppError> {
    state
        .directory
        .get_provider(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Provider {id} not found")))
}

/// GET /login
pub async fn handle_login_page(State(state): State<AppState>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "login",
        configured: state.directory.is_configured(),
    })
}

/// GET /signup
pub async fn handle_signup_page(State(state): State<AppState>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "signup",
        configured: state.directory.is_configured(),
    })
}
