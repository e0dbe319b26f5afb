//! [`AssistantApi`]: the seam between the facade and the external assistant service.
//!
//! Implemented for [`OpenAIAssistantClient`]; tests provide in-memory fakes.

use async_trait::async_trait;
use gateway_core::{AssistantHandle, MessageRole, Result, RunHandle, ThreadMessage};
use openai_assistant::OpenAIAssistantClient;

/// Raw calls to the assistant service. Every call is network-fallible.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    async fn retrieve_assistant(&self, credential: &str) -> Result<AssistantHandle>;
    async fn create_thread(&self) -> Result<String>;
    async fn retrieve_thread(&self, thread_id: &str) -> Result<String>;
    async fn delete_thread(&self, thread_id: &str) -> Result<bool>;
    async fn create_message(&self, thread_id: &str, role: MessageRole, text: &str)
        -> Result<String>;
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunHandle>;
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<RunHandle>;
    /// Newest `limit` messages, most recent first.
    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<ThreadMessage>>;
}

#[async_trait]
impl AssistantApi for OpenAIAssistantClient {
    async fn retrieve_assistant(&self, credential: &str) -> Result<AssistantHandle> {
        OpenAIAssistantClient::retrieve_assistant(self, credential).await
    }

    async fn create_thread(&self) -> Result<String> {
        OpenAIAssistantClient::create_thread(self).await
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<String> {
        OpenAIAssistantClient::retrieve_thread(self, thread_id).await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<bool> {
        OpenAIAssistantClient::delete_thread(self, thread_id).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<String> {
        OpenAIAssistantClient::create_message(self, thread_id, role, text).await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunHandle> {
        OpenAIAssistantClient::create_run(self, thread_id, assistant_id).await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<RunHandle> {
        OpenAIAssistantClient::retrieve_run(self, thread_id, run_id).await
    }

    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<ThreadMessage>> {
        OpenAIAssistantClient::list_messages(self, thread_id, limit).await
    }
}
