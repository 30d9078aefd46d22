//! Kitchen assistant chat.
//!
//! Each turn sends a freshly built system prompt (inventory + recipe names)
//! and the latest utterance only. Earlier turns stay in the transcript for
//! display but are not replayed to the model.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api_connection::endpoints::{ChatCompletionRequest, ChatMessage, Provider};
use crate::api_connection::ApiConnectionError;
use crate::error::{KitchenError, Result};
use crate::storage::{InventoryStore, RecipeCatalog};

pub const WELCOME_MESSAGE: &str = "Hello! I'm your kitchen assistant. I can help you find recipes based on your inventory, suggest meal ideas, or answer cooking questions. How can I help you today?";
pub const FALLBACK_MESSAGE: &str =
    "I'm sorry, I encountered an error while processing your request. Please try again.";

/// Anything that can turn a system prompt plus one utterance into a reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system_prompt: &str, utterance: &str) -> std::result::Result<String, ApiConnectionError>;
}

/// OpenRouter-backed completion for a given model.
pub struct OpenRouterBackend {
    provider: Provider,
    model: String,
}

impl OpenRouterBackend {
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterBackend {
    async fn complete(&self, system_prompt: &str, utterance: &str) -> std::result::Result<String, ApiConnectionError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(utterance)],
            temperature: Some(0.7),
            max_tokens: Some(1024),
        };
        let response = self.provider.call_chat_completion(request).await?;
        response
            .first_text()
            .map(str::to_string)
            .ok_or(ApiConnectionError::EmptyResponse)
    }
}

pub fn build_system_prompt(inventory: &InventoryStore, catalog: &RecipeCatalog) -> String {
    let inventory_context = if inventory.is_empty() {
        "Your inventory is currently empty.".to_string()
    } else {
        let listed: Vec<String> = inventory
            .items()
            .iter()
            .map(|item| format!("{} ({} {})", item.name, item.quantity, item.unit))
            .collect();
        format!("Current inventory: {}.", listed.join(", "))
    };

    let recipes_context = if catalog.is_empty() {
        "No recipes are currently available.".to_string()
    } else {
        let names: Vec<&str> = catalog.recipes().iter().map(|recipe| recipe.name.as_str()).collect();
        format!("Available recipes: {}.", names.join(", "))
    };

    format!(
        "You are a helpful kitchen assistant AI. Your goal is to help users find recipes, suggest meal ideas, and answer cooking questions.
{}
{}

When suggesting recipes, prioritize ones that can be made with the user's current inventory.
If asked about a specific recipe, provide detailed information about ingredients and preparation steps.
Be friendly, helpful, and concise in your responses.",
        inventory_context, recipes_context
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// A submitted turn waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub system_prompt: String,
    pub utterance: String,
}

// Clears the loading flag however the in-flight request ends, including
// when the `send` future is dropped before the reply arrives.
struct LoadingGuard<'a>(&'a mut bool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    loading: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                role: Role::Assistant,
                content: WELCOME_MESSAGE.to_string(),
            }],
            loading: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Records the user's turn and enters the loading state.
    ///
    /// Blank input yields `Ok(None)`. While a turn is outstanding, a new
    /// submission is refused with [`KitchenError::ChatBusy`].
    pub fn begin(
        &mut self,
        utterance: &str,
        inventory: &InventoryStore,
        catalog: &RecipeCatalog,
    ) -> Result<Option<PendingTurn>> {
        if self.loading {
            return Err(KitchenError::ChatBusy);
        }
        if utterance.trim().is_empty() {
            return Ok(None);
        }

        self.messages.push(Message {
            role: Role::User,
            content: utterance.to_string(),
        });
        self.loading = true;
        Ok(Some(PendingTurn {
            system_prompt: build_system_prompt(inventory, catalog),
            utterance: utterance.to_string(),
        }))
    }

    /// Appends the reply, or the fallback message on failure, and clears
    /// the loading state. Failures are never retried.
    pub fn finish(&mut self, outcome: std::result::Result<String, ApiConnectionError>) -> &Message {
        let content = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Assistant request failed: {}", e);
                FALLBACK_MESSAGE.to_string()
            }
        };
        self.messages.push(Message {
            role: Role::Assistant,
            content,
        });
        self.loading = false;
        &self.messages[self.messages.len() - 1]
    }

    /// Runs one full turn against `backend`. Returns the appended assistant
    /// message, or `None` for blank input.
    ///
    /// Dropping the future mid-request leaves the user's message without a
    /// reply but clears the loading state, so the next turn is accepted.
    pub async fn send(
        &mut self,
        backend: &dyn CompletionBackend,
        utterance: &str,
        inventory: &InventoryStore,
        catalog: &RecipeCatalog,
    ) -> Result<Option<&Message>> {
        let Some(turn) = self.begin(utterance, inventory, catalog)? else {
            return Ok(None);
        };
        debug!("Asking assistant: {}", turn.utterance);
        let outcome = {
            let _loading = LoadingGuard(&mut self.loading);
            backend.complete(&turn.system_prompt, &turn.utterance).await
        };
        Ok(Some(self.finish(outcome)))
    }
}
