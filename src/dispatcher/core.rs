use std::sync::Arc;

use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use smallvec::SmallVec;

use crate::context::{ParamVec, RouteContext};
use crate::ids::{TraceId, TRACE_ID_HEADER};

/// Maximum inline headers before heap allocation.
/// Most requests carry no more than 16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage.
///
/// Header names use `Arc<str>` because the same few names repeat on every request
/// and every response (`content-type`, `origin`, the CORS set).
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request data handed to the router by the host server.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Trace identifier, echoed as `X-Trace-ID` by the tracing middleware
    pub trace_id: TraceId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Percent-decoded request path without the query string
    pub path: String,
    /// Query string parameters
    pub query_params: ParamVec,
    /// HTTP headers as received
    pub headers: HeaderVec,
    /// Raw request body
    pub body: Vec<u8>,
}

impl HandlerRequest {
    /// Build a request from a method and a request target such as `/users/42?full=true`.
    #[must_use]
    pub fn new(method: Method, uri: &str) -> Self {
        let (raw_path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };
        let path = urlencoding::decode(raw_path)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| raw_path.to_string());
        let query_params = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            trace_id: TraceId::new(),
            method,
            path,
            query_params,
            headers: HeaderVec::new(),
            body: Vec::new(),
        }
    }

    /// Convert an `http::Request` into a `HandlerRequest`.
    ///
    /// Header values that are not visible ASCII are skipped.
    pub fn from_http<B: AsRef<[u8]>>(req: &http::Request<B>) -> Self {
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let mut out = Self::new(req.method().clone(), target);
        for (name, value) in req.headers() {
            if let Ok(value) = value.to_str() {
                out.headers.push((Arc::from(name.as_str()), value.to_string()));
            }
        }
        out.trace_id = TraceId::from_header_or_new(out.get_header(TRACE_ID_HEADER));
        out.body = req.body().as_ref().to_vec();
        out
    }

    /// Add or replace a header. Setting `X-Trace-ID` also adopts the trace id.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case(TRACE_ID_HEADER) {
            self.trace_id = TraceId::from_header_or_new(Some(&value));
        }
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name. The last occurrence wins.
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Decode the request body as JSON.
    pub fn read_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Response body variants a handler can produce.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResponseBody {
    #[default]
    Empty,
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl ResponseBody {
    fn default_content_type(&self) -> Option<&'static str> {
        match self {
            ResponseBody::Empty | ResponseBody::Bytes(_) => None,
            ResponseBody::Json(_) => Some("application/json"),
            ResponseBody::Text(_) => Some("text/plain; charset=utf-8"),
        }
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ResponseBody::Empty => Vec::new(),
            ResponseBody::Json(v) => v.to_string().into_bytes(),
            ResponseBody::Text(s) => s.into_bytes(),
            ResponseBody::Bytes(b) => b,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseBody::Empty => true,
            ResponseBody::Json(_) => false,
            ResponseBody::Text(s) => s.is_empty(),
            ResponseBody::Bytes(b) => b.is_empty(),
        }
    }
}

/// Response produced by the dispatch path and its handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers
    pub headers: HeaderVec,
    pub body: ResponseBody,
}

impl Default for HandlerResponse {
    fn default() -> Self {
        Self::new(200)
    }
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: ResponseBody::Empty,
        }
    }

    /// Create a JSON response with a `content-type` header
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut res = Self::new(status);
        res.set_header("content-type", "application/json".to_string());
        res.body = ResponseBody::Json(body);
        res
    }

    /// Create an error response with body `{"error": message}`
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Replace status and body with a JSON payload, keeping headers already set.
    pub fn set_json(&mut self, status: u16, body: Value) {
        self.status = status;
        self.set_header("content-type", "application/json".to_string());
        self.body = ResponseBody::Json(body);
    }

    /// Replace status and body with an error payload, keeping headers already set.
    pub fn set_error(&mut self, status: u16, message: &str) {
        self.set_json(status, serde_json::json!({ "error": message }));
    }

    /// Get a header by name (case-insensitive)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Convert into an `http::Response` for the host server.
    ///
    /// A `content-type` matching the body variant is added when the handler did not set one.
    pub fn into_http(self) -> Result<http::Response<Vec<u8>>, http::Error> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_ref(), value.as_str());
        }
        if self.get_header("content-type").is_none() {
            if let Some(content_type) = self.body.default_content_type() {
                builder = builder.header("content-type", content_type);
            }
        }
        builder.body(self.body.into_bytes())
    }
}

/// A request handler bound to a route.
///
/// Closures with the matching signature implement this trait.
pub trait RouteHandler: Send + Sync {
    fn handle(&self, req: &HandlerRequest, res: &mut HandlerResponse, ctx: &mut RouteContext);
}

impl<F> RouteHandler for F
where
    F: Fn(&HandlerRequest, &mut HandlerResponse, &mut RouteContext) + Send + Sync,
{
    fn handle(&self, req: &HandlerRequest, res: &mut HandlerResponse, ctx: &mut RouteContext) {
        self(req, res, ctx)
    }
}

/// Anything that turns a request into a response: routers, aggregates and pipelines.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, req: &HandlerRequest) -> HandlerResponse;
}

impl<D: Dispatch + ?Sized> Dispatch for Arc<D> {
    fn dispatch(&self, req: &HandlerRequest) -> HandlerResponse {
        (**self).dispatch(req)
    }
}
