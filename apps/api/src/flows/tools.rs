//! Tools the recommendation flow offers to the model.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::directory::Directory;
use crate::llm_client::ToolDefinition;
use crate::models::Provider;

pub const FIND_PROVIDERS_TOOL: &str = "findProviders";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindProvidersInput {
    service_query: String,
}

pub fn find_providers_definition() -> ToolDefinition {
    ToolDefinition {
        name: FIND_PROVIDERS_TOOL,
        description: "Searches the real-time provider database for service providers based on a \
            service type like \"plumbing\" or \"gardening\".",
        input_schema: json!({
            "type": "object",
            "properties": {
                "serviceQuery": {
                    "type": "string",
                    "description": "The type of service to search for."
                }
            },
            "required": ["serviceQuery"]
        }),
    }
}

/// Every provider whose service contains `query`, case-insensitively, in directory order.
pub async fn find_providers_by_service(directory: &Directory, query: &str) -> Vec<Provider> {
    directory
        .list_providers()
        .await
        .into_iter()
        .filter(|p| p.offers_service(query))
        .collect()
}

/// Outcome of a tool call, rendered for a `tool_result` block.
#[derive(Debug, PartialEq)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn error(message: String) -> Self {
        Self {
            content: message,
            is_error: true,
        }
    }
}

/// Executes a model-requested tool call against the directory.
///
/// Bad input and unknown tool names are reported back to the model as tool errors.
pub async fn run_tool(directory: &Directory, name: &str, input: &Value) -> ToolOutput {
    if name != FIND_PROVIDERS_TOOL {
        return ToolOutput::error(format!("Unknown tool: {name}"));
    }
    let input: FindProvidersInput = match serde_json::from_value(input.clone()) {
        Ok(input) => input,
        Err(e) => return ToolOutput::error(format!("Invalid input for {name}: {e}")),
    };

    let matches = find_providers_by_service(directory, &input.service_query).await;
    match serde_json::to_string(&matches) {
        Ok(content) => ToolOutput {
            content,
            is_error: false,
        },
        Err(e) => ToolOutput::error(format!("Failed to encode providers: {e}")),
    }
}
