//! Unit tests for MetricsMiddleware against a local Prometheus recorder.

use gateway_core::GatewayError;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::{MiddlewareStack, MetricsMiddleware, RpcMethod};
use std::sync::Arc;

fn render_after<F>(calls: F) -> String
where
    F: FnOnce(&MiddlewareStack, &tokio::runtime::Runtime),
{
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let stack = MiddlewareStack::new().with(Arc::new(MetricsMiddleware));

    metrics::with_local_recorder(&recorder, || calls(&stack, &runtime));
    handle.render()
}

/// **Test: Each call increments the request count and records one duration sample.**
#[test]
fn test_successful_calls_are_counted_and_timed() {
    let output = render_after(|stack, rt| {
        for _ in 0..2 {
            rt.block_on(stack.observe(RpcMethod::CreateThread, async { Ok(()) }))
                .unwrap();
        }
    });

    assert!(output.contains(r#"grpc_request_count{method="CreateThread"} 2"#));
    assert!(output.contains(r#"grpc_request_processing_seconds_count{method="CreateThread"} 2"#));
    assert!(!output.contains("grpc_request_exceptions"));
}

/// **Test: A failed call increments the exception counter for its method only.**
#[test]
fn test_failed_call_increments_exceptions() {
    let output = render_after(|stack, rt| {
        let _ = rt.block_on(stack.observe(RpcMethod::GenerateResponse, async {
            Err::<(), _>(GatewayError::Api("down".to_string()))
        }));
        rt.block_on(stack.observe(RpcMethod::GenerateResponseAnalyzer, async { Ok(()) }))
            .unwrap();
    });

    assert!(output.contains(r#"grpc_request_exceptions{method="GenerateResponse"} 1"#));
    assert!(!output.contains(r#"grpc_request_exceptions{method="GenerateResponseAnalyzer"}"#));
    assert!(output.contains(r#"grpc_request_count{method="GenerateResponseAnalyzer"} 1"#));
}
