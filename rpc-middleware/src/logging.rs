use crate::{RpcMethod, RpcMiddleware};
use gateway_core::GatewayError;
use std::time::Duration;
use tracing::{error, info};

/// Logs each request on entry and its result on exit.
pub struct LoggingMiddleware;

impl RpcMiddleware for LoggingMiddleware {
    fn before(&self, method: RpcMethod) {
        info!(method = %method, "Received request");
    }

    fn after(&self, method: RpcMethod, elapsed: Duration, error: Option<&GatewayError>) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match error {
            Some(e) => error!(method = %method, elapsed_ms, error = %e, "Request failed"),
            None => info!(method = %method, elapsed_ms, "Request completed"),
        }
    }
}
