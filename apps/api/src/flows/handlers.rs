//! Axum route handlers for the flow endpoints.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::flows::recommend::{
    recommend_provider, RecommendProviderRequest, RecommendProviderResponse,
};
use crate::flows::suggest::{suggest_providers, SuggestProvidersRequest, SuggestProvidersResponse};
use crate::state::AppState;

/// POST /api/v1/suggestions
///
/// No minimum length here; the live endpoint applies its own threshold.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestProvidersRequest>,
) -> Result<Json<SuggestProvidersResponse>, AppError> {
    let suggested_providers =
        suggest_providers(&state.directory, state.llm.as_ref(), &request.request_description)
            .await?;

    Ok(Json(SuggestProvidersResponse {
        suggested_providers,
    }))
}

/// POST /api/v1/recommendations
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendProviderRequest>,
) -> Result<Json<RecommendProviderResponse>, AppError> {
    let response = recommend_provider(&state.directory, state.llm.as_ref(), &request.message).await?;
    Ok(Json(response))
}
