//! In-memory [`AssistantApi`] for tests in this and downstream crates (feature `testing`).
//!
//! Counts every call and replays a scripted sequence of run statuses.

use crate::api::AssistantApi;
use async_trait::async_trait;
use gateway_core::{
    AssistantHandle, GatewayError, MessageRole, Result, RunHandle, RunStatus, ThreadMessage,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Scripted fake of the assistant service.
///
/// Run polls pop from the status script; `None` entries simulate a failed lookup. Once the
/// script is exhausted every poll reports `in_progress`.
#[derive(Default)]
pub struct FakeAssistantApi {
    pub assistant_fetches: AtomicUsize,
    pub threads_created: AtomicUsize,
    pub threads_deleted: AtomicUsize,
    pub messages_created: AtomicUsize,
    pub runs_created: AtomicUsize,
    pub run_polls: AtomicUsize,
    fail_assistant: AtomicBool,
    fail_create_thread: AtomicBool,
    fail_create_message: AtomicBool,
    fail_create_run: AtomicBool,
    fail_list_messages: AtomicBool,
    run_statuses: Mutex<VecDeque<Option<RunStatus>>>,
    reply: Mutex<Option<String>>,
    last_message: Mutex<Option<(String, MessageRole, String)>>,
}

impl FakeAssistantApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `in_progress` for the first `n - 1` polls and `completed` on poll `n`.
    pub async fn complete_on_poll(self, n: usize) -> Self {
        let mut script: Vec<Option<RunStatus>> =
            vec![Some(RunStatus::InProgress); n.saturating_sub(1)];
        script.push(Some(RunStatus::Completed));
        self.with_statuses(script).await
    }

    pub async fn with_statuses(self, statuses: Vec<Option<RunStatus>>) -> Self {
        *self.run_statuses.lock().await = statuses.into();
        self
    }

    /// Text of the newest thread message returned by `list_messages`.
    pub async fn with_reply(self, reply: &str) -> Self {
        *self.reply.lock().await = Some(reply.to_string());
        self
    }

    pub fn failing_assistant(self) -> Self {
        self.fail_assistant.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_create_thread(self) -> Self {
        self.fail_create_thread.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_create_message(self) -> Self {
        self.fail_create_message.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_create_run(self) -> Self {
        self.fail_create_run.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_list_messages(self) -> Self {
        self.fail_list_messages.store(true, Ordering::SeqCst);
        self
    }

    /// Restores assistant retrieval after `failing_assistant`.
    pub fn recover_assistant(&self) {
        self.fail_assistant.store(false, Ordering::SeqCst);
    }

    /// Thread, role and text of the last appended message.
    pub async fn last_message(&self) -> Option<(String, MessageRole, String)> {
        self.last_message.lock().await.clone()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn fake_error(what: &str) -> GatewayError {
    GatewayError::Api(format!("fake {} failure", what))
}

#[async_trait]
impl AssistantApi for FakeAssistantApi {
    async fn retrieve_assistant(&self, credential: &str) -> Result<AssistantHandle> {
        self.assistant_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_assistant.load(Ordering::SeqCst) {
            return Err(fake_error("retrieve_assistant"));
        }
        Ok(AssistantHandle {
            id: credential.to_string(),
            name: Some(format!("assistant {}", credential)),
            model: "gpt-4o-mini".to_string(),
        })
    }

    async fn create_thread(&self) -> Result<String> {
        if self.fail_create_thread.load(Ordering::SeqCst) {
            return Err(fake_error("create_thread"));
        }
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("thread_{}", n))
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<String> {
        Ok(thread_id.to_string())
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<bool> {
        if thread_id.starts_with("missing") {
            return Err(fake_error("delete_thread"));
        }
        self.threads_deleted.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<String> {
        if self.fail_create_message.load(Ordering::SeqCst) {
            return Err(fake_error("create_message"));
        }
        let n = self.messages_created.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_message.lock().await =
            Some((thread_id.to_string(), role, text.to_string()));
        Ok(format!("msg_{}", n))
    }

    async fn create_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<RunHandle> {
        if self.fail_create_run.load(Ordering::SeqCst) {
            return Err(fake_error("create_run"));
        }
        let n = self.runs_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(RunHandle {
            id: format!("run_{}", n),
            status: RunStatus::Queued,
        })
    }

    async fn retrieve_run(&self, _thread_id: &str, run_id: &str) -> Result<RunHandle> {
        self.run_polls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .run_statuses
            .lock()
            .await
            .pop_front()
            .unwrap_or(Some(RunStatus::InProgress));
        match next {
            Some(status) => Ok(RunHandle {
                id: run_id.to_string(),
                status,
            }),
            None => Err(fake_error("retrieve_run")),
        }
    }

    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<ThreadMessage>> {
        if self.fail_list_messages.load(Ordering::SeqCst) {
            return Err(fake_error("list_messages"));
        }
        let reply = self.reply.lock().await.clone();
        Ok(reply
            .map(|text| ThreadMessage {
                id: format!("{}_latest", thread_id),
                role: MessageRole::Assistant,
                text: Some(text),
            })
            .into_iter()
            .take(limit as usize)
            .collect())
    }
}
