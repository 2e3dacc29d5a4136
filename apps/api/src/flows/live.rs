//! Live suggestions over a websocket.
//!
//! The client sends the full request description on every edit. Once the
//! description is long enough, a suggestion fetch is debounced; shorter input
//! cancels the pending timer and clears the suggestions. A fetch that has
//! already started always delivers its result.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::debounce::Debouncer;
use crate::directory::Directory;
use crate::flows::suggest::{suggest_providers, SuggestProvidersResponse};
use crate::llm_client::LanguageModel;
use crate::state::AppState;

/// Descriptions must be longer than this (trimmed, in chars) to trigger a fetch.
pub const MIN_DESCRIPTION_CHARS: usize = 15;

#[derive(Debug, Clone, Serialize)]
pub struct LiveError {
    pub title: &'static str,
    pub message: String,
}

/// Frames pushed to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LiveEvent {
    Suggestions(SuggestProvidersResponse),
    Error { error: LiveError },
}

impl LiveEvent {
    fn cleared() -> Self {
        LiveEvent::Suggestions(SuggestProvidersResponse {
            suggested_providers: Vec::new(),
        })
    }
}

/// Per-connection state: one debouncer, one outbound channel.
pub struct LiveSuggestions {
    directory: Directory,
    llm: Arc<dyn LanguageModel>,
    debouncer: Debouncer,
    events: mpsc::Sender<LiveEvent>,
}

impl LiveSuggestions {
    pub fn new(
        directory: Directory,
        llm: Arc<dyn LanguageModel>,
        debounce: std::time::Duration,
        events: mpsc::Sender<LiveEvent>,
    ) -> Self {
        Self {
            directory,
            llm,
            debouncer: Debouncer::new(debounce),
            events,
        }
    }

    /// Handles one edit of the request description.
    pub async fn on_description(&mut self, description: String) {
        if description.trim().chars().count() <= MIN_DESCRIPTION_CHARS {
            self.debouncer.cancel();
            let _ = self.events.send(LiveEvent::cleared()).await;
            return;
        }

        let directory = self.directory.clone();
        let llm = self.llm.clone();
        let events = self.events.clone();
        self.debouncer.schedule(async move {
            let event = match suggest_providers(&directory, llm.as_ref(), &description).await {
                Ok(suggested_providers) => {
                    LiveEvent::Suggestions(SuggestProvidersResponse { suggested_providers })
                }
                Err(e) => {
                    error!("Error fetching suggestions: {e}");
                    LiveEvent::Error {
                        error: LiveError {
                            title: "AI Suggestion Error",
                            message: "Could not fetch provider suggestions. Please try again."
                                .to_string(),
                        },
                    }
                }
            };
            let failed = matches!(event, LiveEvent::Error { .. });
            if events.send(event).await.is_err() {
                return;
            }
            if failed {
                let _ = events.send(LiveEvent::cleared()).await;
            }
        });
    }
}

/// GET /api/v1/suggestions/live
pub async fn handle_live_suggestions(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_live_session(socket, state))
}

async fn run_live_session(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<LiveEvent>(16);

    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to encode live event: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut session = LiveSuggestions::new(
        state.directory.clone(),
        state.llm.clone(),
        state.config.suggestion_debounce,
        tx,
    );

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(description)) => session.on_description(description).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Live suggestion socket error: {e}");
                break;
            }
        }
    }

    // Dropping the session cancels any pending timer; in-flight fetches keep
    // the channel open until they finish.
    drop(session);
    let _ = writer.await;
    debug!("Live suggestion session closed");
}
