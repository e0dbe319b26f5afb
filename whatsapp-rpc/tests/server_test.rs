//! End-to-end: serve both listeners on ephemeral ports, call the service over gRPC, shut down.

use std::sync::Arc;

use assistant_client::testing::FakeAssistantApi;
use assistant_client::{AssistantClient, AssistantConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use whatsapp_rpc::proto::whats_app_service_client::WhatsAppServiceClient;
use whatsapp_rpc::proto::{CreateThreadRequest, GenerateResponseRequest};
use whatsapp_rpc::{build_rpc, serve};

fn assistant_config() -> AssistantConfig {
    AssistantConfig {
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "http://127.0.0.1:9/v1".to_string(),
        primary_assistant: "asst_primary".to_string(),
        analyzer_assistant: "asst_analyzer".to_string(),
        run_timeout_secs: 5,
        poll_interval_ms: 10,
        cache_ttl_secs: None,
    }
}

/// **Test: A gRPC client gets a thread and a reply; cancelling stops both servers cleanly.**
#[tokio::test]
async fn test_serve_answers_and_shuts_down() {
    let api = Arc::new(
        FakeAssistantApi::new()
            .complete_on_poll(2)
            .await
            .with_reply("Hello from the assistant")
            .await,
    );
    let shutdown = CancellationToken::new();
    let rpc = build_rpc(
        AssistantClient::new(api.clone()),
        &assistant_config(),
        shutdown.clone(),
    );
    let metrics = PrometheusBuilder::new().build_recorder().handle();

    let grpc_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let http_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let grpc_addr = grpc_listener.local_addr().unwrap();

    let server = tokio::spawn(serve(
        grpc_listener,
        http_listener,
        rpc,
        metrics,
        shutdown.clone(),
    ));

    let mut client = WhatsAppServiceClient::connect(format!("http://{}", grpc_addr))
        .await
        .expect("connect");

    let thread_id = client
        .create_thread(CreateThreadRequest {})
        .await
        .unwrap()
        .into_inner()
        .thread_id;
    assert_eq!(thread_id, "thread_1");

    let reply = client
        .generate_response(GenerateResponseRequest {
            phone: "5215512345678".to_string(),
            thread_id,
            message_body: "hello".to_string(),
        })
        .await
        .unwrap()
        .into_inner()
        .response;
    assert_eq!(reply, "Hello from the assistant");
    assert_eq!(FakeAssistantApi::count(&api.run_polls), 2);

    drop(client);
    shutdown.cancel();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), server)
        .await
        .expect("servers stop after cancel")
        .expect("server task joined");
    assert!(result.is_ok());
}
