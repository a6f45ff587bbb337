use std::time::Duration;

use tracing::{info, warn};

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Logs one line per request after the response is produced.
///
/// Server errors are logged at warn, everything else at info.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, latency: Duration) {
        let latency_ms = latency.as_secs_f64() * 1000.0;
        if res.status >= 500 {
            warn!(
                trace_id = %req.trace_id,
                method = %req.method,
                path = %req.path,
                status = res.status,
                latency_ms,
                "request failed"
            );
        } else {
            info!(
                trace_id = %req.trace_id,
                method = %req.method,
                path = %req.path,
                status = res.status,
                latency_ms,
                "request completed"
            );
        }
    }
}
