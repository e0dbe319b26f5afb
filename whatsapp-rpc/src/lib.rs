//! # WhatsApp RPC gateway
//!
//! gRPC service that answers WhatsApp messages with OpenAI assistant replies, plus an HTTP
//! listener for Prometheus scrapes and webhook acknowledgments. Config is loaded from env.

pub mod config;
pub mod http;
pub mod proto;
pub mod runner;
pub mod service;

pub use config::ServerConfig;
pub use runner::{build_assistant_client, build_rpc, run_server, serve};
pub use service::WhatsAppRpc;
