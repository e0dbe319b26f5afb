//! # Assistant client
//!
//! Facade over the external assistant API used by the gateway:
//!
//! - [`AssistantApi`]: raw service calls, implemented for the OpenAI client.
//! - [`AssistantClient`]: cached assistant lookup, threads, messages, runs.
//! - [`RunWaiter`]: bounded polling until a run completes.
//! - [`AssistantConfig`]: credentials and timing from the environment.

pub mod api;
pub mod cache;
pub mod config;
pub mod facade;
pub mod waiter;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use api::AssistantApi;
pub use cache::AssistantCache;
pub use config::AssistantConfig;
pub use facade::AssistantClient;
pub use waiter::{RunOutcome, RunWaiter, DEFAULT_POLL_INTERVAL, DEFAULT_RUN_TIMEOUT};
