use std::fmt;
use std::sync::Arc;

use http::Method;

use crate::context::{Permission, RouteParams};
use crate::dispatcher::RouteHandler;

/// One segment of a stored path template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly
    Literal(String),
    /// `:name` placeholder bound to whatever the request carries at this position
    Capture(Arc<str>),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Segment::Capture(Arc::from(name)),
            None => Segment::Literal(raw.to_string()),
        }
    }
}

/// A registered route: method, full path template, permissions and handler.
#[derive(Clone)]
pub struct Route {
    method: Method,
    template: String,
    segments: Vec<Segment>,
    required_permissions: Vec<Permission>,
    protected: bool,
    handler: Arc<dyn RouteHandler>,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template)
            .field("required_permissions", &self.required_permissions)
            .field("protected", &self.protected)
            .finish_non_exhaustive()
    }
}

impl Route {
    pub(crate) fn new(
        method: Method,
        template: String,
        required_permissions: Vec<Permission>,
        protected: bool,
        handler: Arc<dyn RouteHandler>,
    ) -> Self {
        let segments = template.split('/').map(Segment::parse).collect();
        Self {
            method,
            template,
            segments,
            required_permissions,
            protected,
            handler,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full stored template, including the router base path
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn required_permissions(&self) -> &[Permission] {
        &self.required_permissions
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub(crate) fn handler(&self) -> &dyn RouteHandler {
        self.handler.as_ref()
    }

    /// Prepend a prefix to the stored template. Used once, when a MultiRouter adopts the route.
    ///
    /// A root template (`/`) becomes the prefix itself.
    pub(crate) fn rebase(&mut self, prefix: &str) {
        self.template = if self.template == "/" {
            prefix.to_string()
        } else {
            format!("{}{}", prefix, self.template)
        };
        self.segments = self.template.split('/').map(Segment::parse).collect();
    }

    /// Match pre-split request segments against this route.
    ///
    /// Returns the captured params when the method is equal, the segment counts are equal
    /// and every literal segment matches.
    pub(crate) fn matches(&self, method: &Method, request: &[&str]) -> Option<RouteParams> {
        if self.method != *method || self.segments.len() != request.len() {
            return None;
        }
        let mut params = RouteParams::new();
        for (segment, actual) in self.segments.iter().zip(request) {
            match segment {
                Segment::Capture(name) => params.insert(Arc::clone(name), (*actual).to_string()),
                Segment::Literal(lit) if lit.as_str() == *actual => {}
                Segment::Literal(_) => return None,
            }
        }
        Some(params)
    }
}

/// `METHOD /template`, the format used by `list_routes`
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}
