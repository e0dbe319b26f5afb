//! Run-completion waiter: poll a run until it completes, fails, or a deadline passes.

use crate::facade::AssistantClient;
use gateway_core::RunStatus;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How a wait ended. Only `Completed` means a reply can be read from the thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The run reached a terminal state other than completed.
    Failed(RunStatus),
    TimedOut,
    /// The wait was abandoned because the server is shutting down.
    Cancelled,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// Poll-then-sleep loop bounded by a hard deadline on the runtime clock.
#[derive(Debug, Clone, Copy)]
pub struct RunWaiter {
    poll_interval: Duration,
    timeout: Duration,
}

impl Default for RunWaiter {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_RUN_TIMEOUT)
    }
}

impl RunWaiter {
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Waits for the run to complete.
    ///
    /// A failed status lookup counts as "not yet complete"; only the deadline ends the loop in
    /// that case. Cancellation of `cancel` ends the wait at once.
    #[instrument(skip(self, client, cancel), fields(timeout_secs = self.timeout.as_secs()))]
    pub async fn wait(
        &self,
        client: &AssistantClient,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> RunOutcome {
        let poll = async {
            loop {
                match client.get_run_status(thread_id, run_id).await {
                    Some(status) if status.is_completed() => return RunOutcome::Completed,
                    Some(status) if status.is_terminal_failure() => {
                        return RunOutcome::Failed(status)
                    }
                    _ => {}
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => RunOutcome::Cancelled,
            result = tokio::time::timeout(self.timeout, poll) => {
                result.unwrap_or(RunOutcome::TimedOut)
            }
        };

        match &outcome {
            RunOutcome::Completed => info!("Run completed"),
            RunOutcome::Failed(status) => error!(status = %status, "Run ended without completing"),
            RunOutcome::TimedOut => error!("Run did not complete within the timeout"),
            RunOutcome::Cancelled => warn!("Run wait cancelled"),
        }
        outcome
    }
}
