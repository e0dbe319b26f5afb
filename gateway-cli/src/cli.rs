//! CLI parser, config loading and thread maintenance commands.

use anyhow::{Context, Result};
use assistant_client::AssistantClient;
use clap::{Parser, Subcommand};
use openai_assistant::OpenAIAssistantClient;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use whatsapp_rpc::ServerConfig;

#[derive(Parser)]
#[command(name = "whatsapp-gateway")]
#[command(about = "WhatsApp AI reply gateway: serve, thread show, thread delete", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the gRPC server and the metrics/webhook listener (config from env).
    Serve {
        /// Overrides GRPC_ADDR.
        #[arg(long)]
        grpc_addr: Option<SocketAddr>,
        /// Overrides METRICS_ADDR.
        #[arg(long)]
        metrics_addr: Option<SocketAddr>,
    },
    /// Inspect or delete assistant threads.
    Thread {
        #[command(subcommand)]
        command: ThreadCommands,
    },
}

#[derive(Subcommand)]
pub enum ThreadCommands {
    /// Check that a thread exists.
    Show { id: String },
    /// Delete one or more threads; failures are reported and skipped.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Load ServerConfig from environment; flags override the listen addresses.
pub fn load_config(
    grpc_addr: Option<SocketAddr>,
    metrics_addr: Option<SocketAddr>,
) -> Result<ServerConfig> {
    ServerConfig::load(grpc_addr, metrics_addr)
}

/// Facade for maintenance commands. Only OPENAI_API_KEY (and optionally OPENAI_BASE_URL) are needed.
pub fn maintenance_client() -> Result<AssistantClient> {
    let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
    let base_url =
        env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
    let openai = OpenAIAssistantClient::with_base_url(api_key, base_url);
    Ok(AssistantClient::new(Arc::new(openai)))
}

/// Prints whether the thread exists. Errors when it cannot be retrieved.
pub async fn show_thread(client: &AssistantClient, id: &str) -> Result<()> {
    match client.retrieve_thread(id).await {
        Some(thread_id) => {
            println!("Thread {} exists.", thread_id);
            Ok(())
        }
        None => anyhow::bail!("thread {} could not be retrieved", id),
    }
}

/// Deletes the threads and prints a summary. Errors when none of them could be deleted.
pub async fn delete_threads(client: &AssistantClient, ids: &[String]) -> Result<usize> {
    let deleted = client.delete_threads(ids).await;
    println!("Deleted {} of {} thread(s).", deleted, ids.len());
    if deleted < ids.len() {
        warn!(deleted, requested = ids.len(), "Some threads were not deleted");
    } else {
        info!(deleted, "Threads deleted");
    }
    if deleted == 0 && !ids.is_empty() {
        anyhow::bail!("no thread was deleted");
    }
    Ok(deleted)
}
