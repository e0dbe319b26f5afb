//! whatsapp-gateway: run the RPC gateway or maintain assistant threads. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use gateway_cli::{
    delete_threads, load_config, maintenance_client, show_thread, Cli, Commands, ThreadCommands,
};
use gateway_core::init_tracing;
use tracing::info;
use whatsapp_rpc::config::DEFAULT_LOG_FILE;
use whatsapp_rpc::run_server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            grpc_addr,
            metrics_addr,
        } => {
            let config = load_config(grpc_addr, metrics_addr)?;
            run_server(config).await?;
            info!("Gateway stopped");
            Ok(())
        }
        Commands::Thread { command } => {
            let log_file =
                std::env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
            init_tracing(&log_file)?;
            let client = maintenance_client()?;
            match command {
                ThreadCommands::Show { id } => {
                    info!(thread_id = %id, "Showing thread");
                    show_thread(&client, &id).await
                }
                ThreadCommands::Delete { ids } => {
                    info!(count = ids.len(), "Deleting threads");
                    let deleted = delete_threads(&client, &ids).await?;
                    info!(deleted, "Thread delete finished");
                    Ok(())
                }
            }
        }
    }
}
