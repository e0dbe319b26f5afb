use crate::config::ServerConfig;
use crate::http;
use crate::service::WhatsAppRpc;
use anyhow::{Context, Result};
use assistant_client::{AssistantClient, AssistantConfig, RunWaiter};
use gateway_core::init_tracing;
use metrics_exporter_prometheus::PrometheusHandle;
use openai_assistant::OpenAIAssistantClient;
use responder::{AssistantProfiles, Responder};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// Facade over the OpenAI Assistants API described by `config`.
pub fn build_assistant_client(config: &AssistantConfig) -> AssistantClient {
    let openai = OpenAIAssistantClient::with_base_url(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
    );
    info!(
        api_key = %openai.masked_key(),
        base_url = %config.openai_base_url,
        "OpenAI client initialized"
    );
    AssistantClient::with_cache_ttl(Arc::new(openai), config.cache_ttl())
}

/// RPC handlers over `client`; run waits end when `shutdown` is cancelled.
pub fn build_rpc(
    client: AssistantClient,
    config: &AssistantConfig,
    shutdown: CancellationToken,
) -> WhatsAppRpc {
    let waiter = RunWaiter::new(config.poll_interval(), config.run_timeout());
    let responder = Responder::new(client, waiter).with_shutdown(shutdown);
    WhatsAppRpc::new(responder, AssistantProfiles::from_config(config))
}

/// Main entry: init logging, install the recorder, bind both listeners and serve until Ctrl+C
/// or SIGTERM.
#[instrument(skip(config))]
pub async fn run_server(config: ServerConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;
    let metrics = rpc_middleware::install_prometheus_recorder()?;

    let shutdown = CancellationToken::new();
    let client = build_assistant_client(&config.assistant);
    let rpc = build_rpc(client, &config.assistant, shutdown.clone());

    let grpc_listener = TcpListener::bind(config.grpc_addr)
        .await
        .with_context(|| format!("failed to bind gRPC address {}", config.grpc_addr))?;
    let http_listener = TcpListener::bind(config.metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics address {}", config.metrics_addr))?;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    serve(grpc_listener, http_listener, rpc, metrics, shutdown).await
}

/// Serves gRPC on `grpc_listener` and HTTP on `http_listener` until `shutdown` is cancelled.
///
/// If either server fails the other is shut down too; both are awaited before returning.
pub async fn serve(
    grpc_listener: TcpListener,
    http_listener: TcpListener,
    rpc: WhatsAppRpc,
    metrics: PrometheusHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let grpc_addr = grpc_listener.local_addr()?;
    let http_addr = http_listener.local_addr()?;

    let grpc = {
        let token = shutdown.clone();
        async move {
            info!(addr = %grpc_addr, "gRPC server listening");
            let result = tonic::transport::Server::builder()
                .add_service(rpc.into_server())
                .serve_with_incoming_shutdown(
                    TcpListenerStream::new(grpc_listener),
                    token.clone().cancelled_owned(),
                )
                .await
                .context("gRPC server failed");
            stop_on_error(&result, &token);
            result
        }
    };

    let http = {
        let token = shutdown.clone();
        async move {
            info!(addr = %http_addr, "Metrics and webhook server listening");
            let result = axum::serve(http_listener, http::router(metrics))
                .with_graceful_shutdown(token.clone().cancelled_owned())
                .await
                .context("HTTP server failed");
            stop_on_error(&result, &token);
            result
        }
    };

    let (grpc_result, http_result) = tokio::join!(grpc, http);
    info!("Servers stopped");
    grpc_result.and(http_result)
}

fn stop_on_error(result: &Result<()>, shutdown: &CancellationToken) {
    if let Err(e) = result {
        error!(error = %e, "Server stopped with an error, shutting down");
        shutdown.cancel();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}
