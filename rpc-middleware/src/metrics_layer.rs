use crate::{RpcMethod, RpcMiddleware};
use anyhow::Context;
use gateway_core::GatewayError;
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub const REQUEST_COUNT: &str = "grpc_request_count";
pub const REQUEST_SECONDS: &str = "grpc_request_processing_seconds";
pub const REQUEST_EXCEPTIONS: &str = "grpc_request_exceptions";

/// Records the three per-method RPC metrics on the current recorder.
pub struct MetricsMiddleware;

impl RpcMiddleware for MetricsMiddleware {
    fn before(&self, method: RpcMethod) {
        counter!(REQUEST_COUNT, "method" => method.as_str()).increment(1);
    }

    fn after(&self, method: RpcMethod, elapsed: Duration, error: Option<&GatewayError>) {
        histogram!(REQUEST_SECONDS, "method" => method.as_str()).record(elapsed.as_secs_f64());
        if error.is_some() {
            counter!(REQUEST_EXCEPTIONS, "method" => method.as_str()).increment(1);
        }
    }
}

pub fn describe_metrics() {
    describe_counter!(REQUEST_COUNT, "Total gRPC requests by method");
    describe_histogram!(
        REQUEST_SECONDS,
        Unit::Seconds,
        "Time spent processing gRPC requests by method"
    );
    describe_counter!(REQUEST_EXCEPTIONS, "gRPC requests that failed, by method");
}

/// Installs the process-wide Prometheus recorder and returns the handle used to render it.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;
    describe_metrics();
    Ok(handle)
}
