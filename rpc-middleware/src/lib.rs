//! # RPC middleware
//!
//! Hooks run around every RPC handler. [`MiddlewareStack::observe`] calls `before` on each layer,
//! awaits the handler, then calls `after` with the elapsed time and the error, if any.
//!
//! - [`LoggingMiddleware`]: one log line in, one out.
//! - [`MetricsMiddleware`]: request count, processing seconds and exception count per method.

mod logging;
mod metrics_layer;
mod method;

#[cfg(test)]
mod test;

use gateway_core::{GatewayError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub use logging::LoggingMiddleware;
pub use metrics_layer::{
    describe_metrics, install_prometheus_recorder, MetricsMiddleware, REQUEST_COUNT,
    REQUEST_EXCEPTIONS, REQUEST_SECONDS,
};
pub use method::RpcMethod;

/// A hook around one RPC call.
pub trait RpcMiddleware: Send + Sync {
    fn before(&self, _method: RpcMethod) {}

    fn after(&self, _method: RpcMethod, _elapsed: Duration, _error: Option<&GatewayError>) {}
}

/// Ordered middleware layers; `before` runs first to last, `after` last to first.
#[derive(Clone, Default)]
pub struct MiddlewareStack {
    layers: Vec<Arc<dyn RpcMiddleware>>,
}

impl MiddlewareStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logging then metrics.
    pub fn standard() -> Self {
        Self::new()
            .with(Arc::new(LoggingMiddleware))
            .with(Arc::new(MetricsMiddleware))
    }

    pub fn with(mut self, layer: Arc<dyn RpcMiddleware>) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Runs `call` for `method` between the layers' hooks and returns its result unchanged.
    pub async fn observe<T, F>(&self, method: RpcMethod, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        for layer in &self.layers {
            layer.before(method);
        }
        let start = Instant::now();
        let result = call.await;
        let elapsed = start.elapsed();
        let error = result.as_ref().err();
        for layer in self.layers.iter().rev() {
            layer.after(method, elapsed, error);
        }
        result
    }
}
