//! # gateway-core
//!
//! Core types shared by the WhatsApp assistant gateway: assistant handles, run status,
//! thread messages, the [`GatewayError`] type and tracing initialization.
//! Transport-agnostic; used by assistant-client, responder and whatsapp-rpc.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{GatewayError, Result};
pub use logger::{gateway_subscriber, init_tracing};
pub use types::{AssistantHandle, MessageRole, RunHandle, RunStatus, ThreadMessage};
