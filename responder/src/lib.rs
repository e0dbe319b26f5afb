//! # Responder
//!
//! Turns one inbound message into one reply text: append the message to the thread, start a run
//! of the profile's assistant, wait for completion and read the newest thread message.
//!
//! Every failure after the append becomes a fixed fallback sentence, so callers always get text
//! to send back to the user.

use assistant_client::{AssistantClient, RunWaiter};
use gateway_core::{GatewayError, MessageRole, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

pub const ASSISTANT_UNAVAILABLE: &str = "assistant retrieval failed";
pub const RUN_FAILED: &str = "execution timed out/failed";
pub const NO_RESPONSE: &str = "no response received";
pub const PROCESSING_ERROR: &str = "error processing request";

/// Named assistant credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantProfile {
    pub name: String,
    pub credential: String,
}

impl AssistantProfile {
    pub fn new(name: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credential: credential.into(),
        }
    }
}

/// The two assistants the gateway talks to.
#[derive(Debug, Clone)]
pub struct AssistantProfiles {
    pub primary: AssistantProfile,
    pub analyzer: AssistantProfile,
}

impl AssistantProfiles {
    pub fn new(primary_credential: &str, analyzer_credential: &str) -> Self {
        Self {
            primary: AssistantProfile::new("primary", primary_credential),
            analyzer: AssistantProfile::new("analyzer", analyzer_credential),
        }
    }

    pub fn from_config(config: &assistant_client::AssistantConfig) -> Self {
        Self::new(&config.primary_assistant, &config.analyzer_assistant)
    }
}

/// Response orchestrator shared by all RPC handlers.
#[derive(Clone)]
pub struct Responder {
    client: AssistantClient,
    waiter: RunWaiter,
    shutdown: CancellationToken,
}

impl Responder {
    pub fn new(client: AssistantClient, waiter: RunWaiter) -> Self {
        Self {
            client,
            waiter,
            shutdown: CancellationToken::new(),
        }
    }

    /// In-flight run waits end as soon as `shutdown` is cancelled.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn client(&self) -> &AssistantClient {
        &self.client
    }

    pub fn waiter(&self) -> &RunWaiter {
        &self.waiter
    }

    /// Appends `text` to the thread, then runs the profile's assistant and returns its reply.
    ///
    /// Only the append can fail; everything after it resolves to reply text or a fallback.
    #[instrument(skip(self, profile, text), fields(profile = %profile.name, text_len = text.len()))]
    pub async fn process_response(
        &self,
        profile: &AssistantProfile,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<String> {
        self.client.add_message(thread_id, role, text).await?;
        Ok(self.execute_and_fetch(thread_id, profile).await)
    }

    /// Runs the profile's assistant on the thread and reads the newest message.
    #[instrument(skip(self, profile), fields(profile = %profile.name))]
    pub async fn execute_and_fetch(&self, thread_id: &str, profile: &AssistantProfile) -> String {
        match self.run_and_read(thread_id, profile).await {
            Ok(reply) => reply,
            Err(GatewayError::MissingAssistant(credential)) => {
                error!(credential = %credential, "Assistant unavailable, replying with fallback");
                ASSISTANT_UNAVAILABLE.to_string()
            }
            Err(e) => {
                error!(error = %e, "Failed to execute assistant run");
                PROCESSING_ERROR.to_string()
            }
        }
    }

    async fn run_and_read(&self, thread_id: &str, profile: &AssistantProfile) -> Result<String> {
        let assistant = self
            .client
            .get_assistant(&profile.credential)
            .await
            .ok_or_else(|| GatewayError::MissingAssistant(profile.name.clone()))?;

        let run_id = self.client.create_run(thread_id, &assistant.id).await?;
        let outcome = self
            .waiter
            .wait(&self.client, thread_id, &run_id, &self.shutdown)
            .await;
        if !outcome.is_completed() {
            warn!(run_id = %run_id, outcome = ?outcome, "Run did not complete");
            return Ok(RUN_FAILED.to_string());
        }

        match self.client.list_latest_message(thread_id).await? {
            Some(reply) => {
                info!(run_id = %run_id, reply_len = reply.len(), "Reply fetched");
                Ok(reply)
            }
            None => {
                warn!(run_id = %run_id, "Thread has no reply text");
                Ok(NO_RESPONSE.to_string())
            }
        }
    }
}
