//! Server config: listen addresses, log file and the assistant settings. Loaded from env.

use anyhow::{Context, Result};
use assistant_client::AssistantConfig;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_GRPC_ADDR: &str = "127.0.0.1:50052";
pub const DEFAULT_METRICS_ADDR: &str = "127.0.0.1:8001";
pub const DEFAULT_LOG_FILE: &str = "logs/whatsapp-gateway.log";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// GRPC_ADDR
    pub grpc_addr: SocketAddr,
    /// METRICS_ADDR: serves /metrics and /webhook
    pub metrics_addr: SocketAddr,
    /// LOG_FILE
    pub log_file: String,
    pub assistant: AssistantConfig,
}

fn addr_var(name: &str, default: &str) -> Result<SocketAddr> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .with_context(|| format!("{} is not a valid socket address: {}", name, raw))
}

impl ServerConfig {
    /// Load from environment variables. CLI flags override the listen addresses when given.
    pub fn load(grpc_addr: Option<SocketAddr>, metrics_addr: Option<SocketAddr>) -> Result<Self> {
        let grpc_addr = match grpc_addr {
            Some(addr) => addr,
            None => addr_var("GRPC_ADDR", DEFAULT_GRPC_ADDR)?,
        };
        let metrics_addr = match metrics_addr {
            Some(addr) => addr,
            None => addr_var("METRICS_ADDR", DEFAULT_METRICS_ADDR)?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let assistant = AssistantConfig::from_env()?;

        Ok(Self {
            grpc_addr,
            metrics_addr,
            log_file,
            assistant,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.grpc_addr == self.metrics_addr {
            anyhow::bail!(
                "GRPC_ADDR and METRICS_ADDR must differ, both are {}",
                self.grpc_addr
            );
        }
        Ok(())
    }
}
