//! Router tests for the metrics and webhook endpoints.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;
use whatsapp_rpc::http::{router, METRICS_CONTENT_TYPE, WEBHOOK_ACK};

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// **Test: GET /metrics renders the recorder in Prometheus text format.**
#[tokio::test]
async fn test_metrics_endpoint_renders_recorder() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    metrics::with_local_recorder(&recorder, || {
        metrics::counter!("grpc_request_count", "method" => "CreateThread").increment(3);
    });

    let response = router(handle)
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        METRICS_CONTENT_TYPE
    );
    let body = body_text(response).await;
    assert!(body.contains(r#"grpc_request_count{method="CreateThread"} 3"#));
}

/// **Test: POST /webhook acknowledges with a fixed text.**
#[tokio::test]
async fn test_webhook_acknowledges() {
    let handle = PrometheusBuilder::new().build_recorder().handle();

    let response = router(handle)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/webhook")
                .body(Body::from(r#"{"entry":[]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, WEBHOOK_ACK);
}

/// **Test: Wrong method and unknown path are rejected.**
#[tokio::test]
async fn test_unrouted_requests() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let app = router(handle);

    let response = app
        .clone()
        .oneshot(Request::get("/webhook").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
