use std::time::Duration;

use tracing::trace;

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::ids::TRACE_ID_HEADER;

/// Echoes the request trace id as `X-Trace-ID` on every response.
///
/// The id was adopted from the incoming header when it held a valid ULID, so callers that
/// send one get the same value back.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, _latency: Duration) {
        trace!(trace_id = %req.trace_id, "attaching trace id");
        res.set_header(TRACE_ID_HEADER, req.trace_id.to_string());
    }
}
