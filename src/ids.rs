use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Header used to carry the trace identifier in and out of the router.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Per-request trace identifier backed by ULID.
///
/// Every [`HandlerRequest`](crate::dispatcher::HandlerRequest) carries one. It is
/// adopted from an incoming `X-Trace-ID` header when that header holds a valid ULID,
/// and freshly generated otherwise.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct TraceId(ulid::Ulid);

impl TraceId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Reuse the caller's trace id when it parses, otherwise start a new trace.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.trim().parse::<TraceId>().ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn as_ulid(&self) -> ulid::Ulid {
        self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TraceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(TraceId)
    }
}
