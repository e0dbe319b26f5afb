//! [`AssistantClient`]: the facade the orchestrator and RPC handlers call.
//!
//! Converts raw [`AssistantApi`] results into the gateway's recovery contract: lookups and
//! thread creation degrade to `None`, message appends and run creation propagate errors.

use crate::api::AssistantApi;
use crate::cache::AssistantCache;
use gateway_core::{AssistantHandle, MessageRole, Result, RunStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Facade over the assistant API with a per-credential assistant cache.
#[derive(Clone)]
pub struct AssistantClient {
    api: Arc<dyn AssistantApi>,
    cache: Arc<AssistantCache>,
}

impl AssistantClient {
    /// Facade whose cached assistants never expire.
    pub fn new(api: Arc<dyn AssistantApi>) -> Self {
        Self::with_cache_ttl(api, None)
    }

    pub fn with_cache_ttl(api: Arc<dyn AssistantApi>, ttl: Option<Duration>) -> Self {
        Self {
            api,
            cache: Arc::new(AssistantCache::with_ttl(ttl)),
        }
    }

    /// Returns the assistant for `credential`, fetching and caching it on a miss.
    ///
    /// A failed fetch returns `None` and leaves the cache unset so the next call retries.
    #[instrument(skip(self))]
    pub async fn get_assistant(&self, credential: &str) -> Option<AssistantHandle> {
        if let Some(handle) = self.cache.get(credential).await {
            return Some(handle);
        }
        info!("Assistant not cached, retrieving");
        match self.api.retrieve_assistant(credential).await {
            Ok(handle) => {
                let handle = self.cache.insert(credential, handle).await;
                info!(assistant_id = %handle.id, "Assistant retrieved and cached");
                Some(handle)
            }
            Err(e) => {
                error!(error = %e, "Failed to retrieve assistant");
                None
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn create_thread(&self) -> Option<String> {
        match self.api.create_thread().await {
            Ok(thread_id) => {
                info!(thread_id = %thread_id, "Thread created");
                Some(thread_id)
            }
            Err(e) => {
                error!(error = %e, "Failed to create thread");
                None
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn retrieve_thread(&self, thread_id: &str) -> Option<String> {
        match self.api.retrieve_thread(thread_id).await {
            Ok(id) => Some(id),
            Err(e) => {
                error!(error = %e, "Failed to retrieve thread");
                None
            }
        }
    }

    /// Deletes one thread. Returns false when the API refused or the call failed.
    #[instrument(skip(self))]
    pub async fn delete_thread(&self, thread_id: &str) -> bool {
        match self.api.delete_thread(thread_id).await {
            Ok(deleted) => {
                if !deleted {
                    warn!("Thread delete was not acknowledged");
                }
                deleted
            }
            Err(e) => {
                error!(error = %e, "Failed to delete thread");
                false
            }
        }
    }

    /// Deletes each thread in turn; failures are logged and skipped. Returns how many were deleted.
    pub async fn delete_threads(&self, thread_ids: &[String]) -> usize {
        let mut deleted = 0;
        for thread_id in thread_ids {
            if self.delete_thread(thread_id).await {
                deleted += 1;
            }
        }
        info!(requested = thread_ids.len(), deleted, "Thread cleanup finished");
        deleted
    }

    /// Appends a message to a thread. Failures propagate to the caller.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn add_message(&self, thread_id: &str, role: MessageRole, text: &str) -> Result<()> {
        self.api
            .create_message(thread_id, role, text)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to add message to thread");
                e
            })?;
        info!("Message added to thread");
        Ok(())
    }

    /// Starts a run of `assistant_id` on the thread and returns the run id.
    #[instrument(skip(self))]
    pub async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<String> {
        let run = self.api.create_run(thread_id, assistant_id).await?;
        info!(run_id = %run.id, status = %run.status, "Run started");
        Ok(run.id)
    }

    /// Current status of a run, or `None` when the API call failed.
    #[instrument(skip(self))]
    pub async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Option<RunStatus> {
        match self.api.retrieve_run(thread_id, run_id).await {
            Ok(run) => {
                info!(status = %run.status, "Run status");
                Some(run.status)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve run status");
                None
            }
        }
    }

    /// Text of the most recent message on the thread; `Ok(None)` when there is none with text.
    #[instrument(skip(self))]
    pub async fn list_latest_message(&self, thread_id: &str) -> Result<Option<String>> {
        let messages = self.api.list_messages(thread_id, 1).await?;
        Ok(messages.into_iter().next().and_then(|m| m.text))
    }
}
