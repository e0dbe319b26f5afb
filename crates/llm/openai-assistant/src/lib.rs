//! # OpenAI Assistants client
//!
//! Thin wrapper around [async-openai] for the Assistants endpoints used by the gateway:
//! assistant retrieval, thread create/retrieve/delete, message create/list, run create/retrieve.
//! Converts API objects into [`gateway_core`] types and every failure into [`GatewayError::Api`].

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        CreateMessageRequestArgs, CreateRunRequestArgs, CreateThreadRequestArgs, MessageContent,
        MessageObject, MessageRole as ApiMessageRole, RunObject,
    },
    Client,
};
use gateway_core::{
    AssistantHandle, GatewayError, MessageRole, Result, RunHandle, RunStatus, ThreadMessage,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

fn api_error(e: OpenAIError) -> GatewayError {
    GatewayError::Api(e.to_string())
}

/// Serialized wire name of an API enum (e.g. `"in_progress"`), independent of its Rust variant set.
fn wire_name<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
}

fn run_status(run: &RunObject) -> RunStatus {
    wire_name(&run.status)
        .map(|s| RunStatus::from_api_str(&s))
        .unwrap_or_else(|| RunStatus::Unknown(format!("{:?}", run.status)))
}

fn to_thread_message(message: &MessageObject) -> ThreadMessage {
    let role = match wire_name(&message.role).as_deref() {
        Some("assistant") => MessageRole::Assistant,
        _ => MessageRole::User,
    };
    let text = message.content.iter().find_map(|part| match part {
        MessageContent::Text(t) => Some(t.text.value.clone()),
        _ => None,
    });
    ThreadMessage {
        id: message.id.clone(),
        role,
        text,
    }
}

/// Assistants API client. Wraps an async-openai client; optionally holds the API key for masked logging.
#[derive(Clone)]
pub struct OpenAIAssistantClient {
    client: Arc<Client<OpenAIConfig>>,
    /// API key stored only for logging (masked). None when created via `with_client()`.
    api_key_for_logging: Option<String>,
}

impl OpenAIAssistantClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client with a custom base URL (proxies, compatible endpoints, test servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client from an existing async-openai client (no API key stored for logging).
    pub fn with_client(client: Client<OpenAIConfig>) -> Self {
        Self {
            client: Arc::new(client),
            api_key_for_logging: None,
        }
    }

    /// Masked API key for log fields.
    pub fn masked_key(&self) -> String {
        self.api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string())
    }

    #[instrument(skip(self))]
    pub async fn retrieve_assistant(&self, assistant_id: &str) -> Result<AssistantHandle> {
        info!(api_key = %self.masked_key(), "OpenAI retrieve assistant");
        let assistant = self
            .client
            .assistants()
            .retrieve(assistant_id)
            .await
            .map_err(api_error)?;
        Ok(AssistantHandle {
            id: assistant.id,
            name: assistant.name,
            model: assistant.model,
        })
    }

    #[instrument(skip(self))]
    pub async fn create_thread(&self) -> Result<String> {
        let request = CreateThreadRequestArgs::default().build().map_err(api_error)?;
        let thread = self
            .client
            .threads()
            .create(request)
            .await
            .map_err(api_error)?;
        debug!(thread_id = %thread.id, "OpenAI thread created");
        Ok(thread.id)
    }

    #[instrument(skip(self))]
    pub async fn retrieve_thread(&self, thread_id: &str) -> Result<String> {
        let thread = self
            .client
            .threads()
            .retrieve(thread_id)
            .await
            .map_err(api_error)?;
        Ok(thread.id)
    }

    /// Deletes a thread; returns the API's `deleted` flag.
    #[instrument(skip(self))]
    pub async fn delete_thread(&self, thread_id: &str) -> Result<bool> {
        let response = self
            .client
            .threads()
            .delete(thread_id)
            .await
            .map_err(api_error)?;
        Ok(response.deleted)
    }

    /// Appends a message to a thread and returns the new message id.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<String> {
        let api_role = match role {
            MessageRole::User => ApiMessageRole::User,
            MessageRole::Assistant => ApiMessageRole::Assistant,
        };
        let request = CreateMessageRequestArgs::default()
            .role(api_role)
            .content(text.to_string())
            .build()
            .map_err(api_error)?;
        let message = self
            .client
            .threads()
            .messages(thread_id)
            .create(request)
            .await
            .map_err(api_error)?;
        Ok(message.id)
    }

    #[instrument(skip(self))]
    pub async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunHandle> {
        let request = CreateRunRequestArgs::default()
            .assistant_id(assistant_id)
            .build()
            .map_err(api_error)?;
        let run = self
            .client
            .threads()
            .runs(thread_id)
            .create(request)
            .await
            .map_err(api_error)?;
        Ok(RunHandle {
            status: run_status(&run),
            id: run.id,
        })
    }

    #[instrument(skip(self))]
    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<RunHandle> {
        let run = self
            .client
            .threads()
            .runs(thread_id)
            .retrieve(run_id)
            .await
            .map_err(api_error)?;
        Ok(RunHandle {
            status: run_status(&run),
            id: run.id,
        })
    }

    /// Lists the newest `limit` messages of a thread, most recent first.
    #[instrument(skip(self))]
    pub async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<ThreadMessage>> {
        let limit = limit.to_string();
        let query = [("order", "desc"), ("limit", limit.as_str())];
        let response = self
            .client
            .threads()
            .messages(thread_id)
            .list(&query)
            .await
            .map_err(api_error)?;
        Ok(response.data.iter().map(to_thread_message).collect())
    }
}
