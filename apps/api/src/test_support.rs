//! In-memory fakes for the store and model boundaries, shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum_extra::extract::cookie::Key;
use serde_json::{json, Value};

use crate::config::Config;
use crate::directory::{Directory, DirectoryStore};
use crate::llm_client::{
    ContentBlock, LanguageModel, LlmError, LlmResponse, Message, ModelRequest, Usage,
};
use crate::models::{Provider, UserProfile};
use crate::state::AppState;

pub fn provider(id: &str, name: &str, service: &str) -> Provider {
    Provider {
        id: id.to_string(),
        name: name.to_string(),
        service: service.to_string(),
        description: format!("{name} offers {service}"),
        rating: 4.5,
        image: "https://placehold.co/600x400.png".to_string(),
        ai_hint: service.to_lowercase(),
        location: Some("Springfield".to_string()),
        contact: None,
        verified: Some(true),
        reviews: vec![],
        skills: None,
    }
}

pub fn user(uid: &str) -> UserProfile {
    UserProfile {
        uid: uid.to_string(),
        email: Some(format!("{uid}@example.com")),
        display_name: Some("Jane Doe".to_string()),
        photo_url: None,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    providers: Vec<Provider>,
    users: Mutex<Vec<UserProfile>>,
}

impl MemoryStore {
    pub fn with_providers(providers: Vec<Provider>) -> Self {
        Self {
            providers,
            users: Mutex::default(),
        }
    }

    pub fn users(&self) -> Vec<UserProfile> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn list_providers(&self) -> Result<Vec<Provider>> {
        Ok(self.providers.clone())
    }

    async fn get_provider(&self, id: &str) -> Result<Option<Provider>> {
        Ok(self.providers.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_user_if_absent(&self, profile: &UserProfile) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.uid == profile.uid) {
            return Ok(false);
        }
        users.push(profile.clone());
        Ok(true)
    }
}

/// A store whose every call fails, as if the database were unreachable.
pub struct FailingStore;

#[async_trait]
impl DirectoryStore for FailingStore {
    async fn list_providers(&self) -> Result<Vec<Provider>> {
        Err(anyhow!("connection refused"))
    }

    async fn get_provider(&self, _id: &str) -> Result<Option<Provider>> {
        Err(anyhow!("connection refused"))
    }

    async fn insert_user_if_absent(&self, _profile: &UserProfile) -> Result<bool> {
        Err(anyhow!("connection refused"))
    }
}

/// A request as the model saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
}

impl RecordedRequest {
    /// Concatenated text of every text block in the conversation.
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .flat_map(|m| m.content.iter())
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Replays queued responses in order and records what it was asked.
#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::default(),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from([Err(error)])),
            requests: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, request: ModelRequest<'_>) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            messages: request.messages.to_vec(),
            tool_names: request.tools.iter().map(|t| t.name.to_string()).collect(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub fn text_response(text: &str) -> LlmResponse {
    LlmResponse {
        content: vec![ContentBlock::Text {
            text: text.to_string(),
        }],
        stop_reason: Some("end_turn".to_string()),
        usage: Usage::default(),
    }
}

pub fn json_response(value: Value) -> LlmResponse {
    text_response(&value.to_string())
}

pub fn empty_response() -> LlmResponse {
    LlmResponse {
        content: vec![],
        stop_reason: Some("end_turn".to_string()),
        usage: Usage::default(),
    }
}

pub fn tool_use_response(id: &str, tool: &str, input: Value) -> LlmResponse {
    LlmResponse {
        content: vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: tool.to_string(),
            input,
        }],
        stop_reason: Some("tool_use".to_string()),
        usage: Usage::default(),
    }
}

pub fn names_response(names: &[&str]) -> LlmResponse {
    json_response(json!({ "suggestedProviders": names }))
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        anthropic_api_key: "test-key".to_string(),
        session_secret: None,
        suggestion_debounce: Duration::from_secs(1),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(directory: Directory, llm: Arc<dyn LanguageModel>) -> AppState {
    AppState {
        directory,
        llm,
        config: test_config(),
        session_key: Key::generate(),
    }
}
