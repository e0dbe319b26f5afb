//! HTTP listener: Prometheus scrape endpoint and webhook acknowledgment.

use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{extract::State, Router};
use metrics_exporter_prometheus::PrometheusHandle;

pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";
pub const WEBHOOK_ACK: &str = "Webhook received";

pub fn router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/webhook", post(webhook))
        .with_state(handle)
}

async fn metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], handle.render())
}

async fn webhook() -> &'static str {
    WEBHOOK_ACK
}
