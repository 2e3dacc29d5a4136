//! Conversational recommendation — the model searches the directory through a
//! tool, then answers with a reply and at most one recommended provider.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::directory::Directory;
use crate::errors::AppError;
use crate::flows::prompts::{RECOMMEND_PROMPT_TEMPLATE, RECOMMEND_SYSTEM};
use crate::flows::tools::{find_providers_definition, run_tool};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{
    parse_json, ContentBlock, LanguageModel, LlmError, Message, ModelRequest, Role,
};
use crate::models::Provider;

/// Upper bound on model turns that end in tool calls.
const MAX_TOOL_ROUNDS: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendProviderRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendProviderResponse {
    pub response_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_provider: Option<Provider>,
}

pub async fn recommend_provider(
    directory: &Directory,
    llm: &dyn LanguageModel,
    user_input: &str,
) -> Result<RecommendProviderResponse, AppError> {
    let tools = [find_providers_definition()];
    let mut messages = vec![Message::user_text(
        fill_template(RECOMMEND_PROMPT_TEMPLATE, &[("user_input", user_input)]),
    )];

    for round in 0..=MAX_TOOL_ROUNDS {
        let response = llm
            .complete(ModelRequest::new(RECOMMEND_SYSTEM, &messages).with_tools(&tools))
            .await
            .map_err(|e| AppError::Llm(format!("Failed to recommend a provider: {e}")))?;

        let calls = response.tool_calls();
        if calls.is_empty() {
            let text = response.text().ok_or(LlmError::EmptyContent).map_err(|e| {
                AppError::Llm(format!("Failed to get a response from the AI. ({e})"))
            })?;
            let output: RecommendProviderResponse = parse_json(text).map_err(|e| {
                AppError::Llm(format!("Recommendation output did not match schema: {e}"))
            })?;
            info!(
                "Recommendation produced after {round} tool round(s); provider={:?}",
                output.recommended_provider.as_ref().map(|p| p.id.as_str())
            );
            return Ok(output);
        }

        if round == MAX_TOOL_ROUNDS {
            break;
        }

        let mut results = Vec::with_capacity(calls.len());
        for call in &calls {
            debug!("Model called {} with {}", call.name, call.input);
            let output = run_tool(directory, call.name, call.input).await;
            results.push(ContentBlock::ToolResult {
                tool_use_id: call.id.to_string(),
                content: output.content,
                is_error: output.is_error,
            });
        }

        messages.push(response.to_assistant_message());
        messages.push(Message {
            role: Role::User,
            content: results,
        });
    }

    Err(AppError::Llm(
        LlmError::ToolLoop {
            rounds: MAX_TOOL_ROUNDS,
        }
        .to_string(),
    ))
}
