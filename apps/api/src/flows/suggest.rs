//! Suggestion flow — free-text request in, short-list of directory providers out.
//!
//! Flow: list providers → (empty? done) → prompt with the enumerated directory →
//!       parse suggested names → keep directory providers whose name was suggested.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::directory::Directory;
use crate::errors::AppError;
use crate::flows::prompts::{SUGGEST_PROMPT_TEMPLATE, SUGGEST_SYSTEM};
use crate::llm_client::prompts::{
    fill_template, DIRECTORY_ONLY_INSTRUCTION, JSON_ONLY_SYSTEM,
};
use crate::llm_client::{parse_json, LanguageModel, Message, ModelRequest};
use crate::models::Provider;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestProvidersRequest {
    pub request_description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestProvidersResponse {
    pub suggested_providers: Vec<Provider>,
}

/// What the model is asked to return: names only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestedNames {
    #[serde(default)]
    suggested_providers: Option<Vec<String>>,
}

/// Suggests up to three directory providers for a free-text request.
///
/// The model is not called when the directory is empty. Returned providers keep
/// directory order; names the model invents are dropped.
pub async fn suggest_providers(
    directory: &Directory,
    llm: &dyn LanguageModel,
    request_description: &str,
) -> Result<Vec<Provider>, AppError> {
    let providers = directory.list_providers().await;

    if providers.is_empty() {
        debug!("No providers in directory; skipping model call");
        return Ok(Vec::new());
    }

    let prompt = build_suggest_prompt(&providers, request_description);
    let system = format!("{SUGGEST_SYSTEM} {JSON_ONLY_SYSTEM} {DIRECTORY_ONLY_INSTRUCTION}");
    let messages = [Message::user_text(prompt)];

    let response = llm
        .complete(ModelRequest::new(&system, &messages))
        .await
        .map_err(|e| AppError::Llm(format!("Failed to suggest providers: {e}")))?;

    let Some(text) = response.text() else {
        return Ok(Vec::new());
    };
    let parsed: SuggestedNames = parse_json(text)
        .map_err(|e| AppError::Llm(format!("Suggestion output did not match schema: {e}")))?;
    let Some(names) = parsed.suggested_providers else {
        return Ok(Vec::new());
    };

    let suggested = select_named(providers, &names);
    info!(
        "Model named {} provider(s); {} matched the directory",
        names.len(),
        suggested.len()
    );
    Ok(suggested)
}

/// Renders the directory enumeration and the user's request into the prompt.
fn build_suggest_prompt(providers: &[Provider], request_description: &str) -> String {
    let listing = providers
        .iter()
        .map(|p| {
            format!(
                "- Name: {}, Service: {}, Location: {}, Description: {}",
                p.name,
                p.service,
                p.location.as_deref().unwrap_or(""),
                p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        SUGGEST_PROMPT_TEMPLATE,
        &[
            ("providers", listing.as_str()),
            ("request_description", request_description),
        ],
    )
}

/// Filters `providers` to those whose name exactly equals a suggested name.
/// Preserves directory order and never yields a provider twice.
fn select_named(providers: Vec<Provider>, names: &[String]) -> Vec<Provider> {
    providers
        .into_iter()
        .filter(|p| names.iter().any(|n| *n == p.name))
        .collect()
}
