mod builder;
mod error;

pub use builder::CorsConfigBuilder;
pub use error::CorsConfigError;

use http::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dispatcher::HandlerResponse;

/// CORS response header names (stored lowercase; lookups are case-insensitive)
pub mod headers {
    pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
    pub const ALLOW_METHODS: &str = "access-control-allow-methods";
    pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
    pub const ALLOW_CREDENTIALS: &str = "access-control-allow-credentials";
    pub const MAX_AGE: &str = "access-control-max-age";
}

/// Methods advertised when the policy lists none
pub const DEFAULT_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
/// Headers advertised when the policy lists none
pub const DEFAULT_ALLOW_HEADERS: &str = "Content-Type, Authorization";

const WILDCARD: &str = "*";

/// Cross-origin policy owned by a [`Router`](crate::router::Router) or
/// [`MultiRouter`](crate::router::MultiRouter).
///
/// `"*"` in `allowed_origins` is the wildcard token, never a literal origin. List order is
/// preserved in the emitted headers.
///
/// Loads from configuration files with snake_case keys; every field is optional:
///
/// ```yaml
/// cors:
///   allowed_origins: ["https://app.example.com"]
///   allowed_methods: ["GET", "POST"]
///   allow_credentials: true
///   max_age: 600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds; zero means the header is never sent
    pub max_age: u32,
}

impl CorsConfig {
    /// Policy used by routers that were given none: any origin, default methods and
    /// headers, no credentials.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec![WILDCARD.to_string()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_wildcard_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == WILDCARD)
    }

    fn lists_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    /// Check the policy for values that can never match a browser request.
    pub fn validate(&self) -> Result<(), CorsConfigError> {
        if self.allow_credentials && self.allowed_origins.is_empty() {
            return Err(CorsConfigError::EmptyOriginsWithCredentials);
        }
        for origin in &self.allowed_origins {
            if origin != WILDCARD && !is_valid_origin(origin) {
                return Err(CorsConfigError::InvalidOriginFormat {
                    origin: origin.clone(),
                });
            }
        }
        for method in &self.allowed_methods {
            if method.is_empty() || Method::from_bytes(method.as_bytes()).is_err() {
                return Err(CorsConfigError::InvalidMethod {
                    method: method.clone(),
                });
            }
        }
        Ok(())
    }
}

/// `scheme://host[:port]` with nothing after the authority
fn is_valid_origin(origin: &str) -> bool {
    let Some((scheme, authority)) = origin.split_once("://") else {
        return false;
    };
    if scheme.is_empty() || authority.is_empty() || authority.contains(['/', '?', '#']) {
        return false;
    }
    url::Url::parse(origin)
        .map(|u| u.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

/// Headers chosen for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
    pub allow_credentials: bool,
    pub max_age: Option<u32>,
}

impl CorsHeaders {
    /// Write the headers onto a response, replacing any earlier values.
    pub fn apply(&self, res: &mut HandlerResponse) {
        res.set_header(headers::ALLOW_ORIGIN, self.allow_origin.clone());
        res.set_header(headers::ALLOW_METHODS, self.allow_methods.clone());
        res.set_header(headers::ALLOW_HEADERS, self.allow_headers.clone());
        res.set_header(
            headers::ALLOW_CREDENTIALS,
            self.allow_credentials.to_string(),
        );
        if let Some(max_age) = self.max_age {
            res.set_header(headers::MAX_AGE, max_age.to_string());
        }
    }
}

/// Decides which CORS headers a request receives under a [`CorsConfig`].
///
/// The resolver carries the always-on mode. In strict mode (the default) a request without
/// an `Origin` header gets no CORS headers. In always-on mode such a request still gets
/// `Access-Control-Allow-Origin: *` when the policy lists the wildcard. Credentials are
/// never granted to an originless request in either mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorsResolver {
    always_on: bool,
}

impl CorsResolver {
    #[must_use]
    pub const fn strict() -> Self {
        Self { always_on: false }
    }

    #[must_use]
    pub const fn always_on() -> Self {
        Self { always_on: true }
    }

    #[must_use]
    pub const fn with_always_on(always_on: bool) -> Self {
        Self { always_on }
    }

    #[must_use]
    pub const fn is_always_on(&self) -> bool {
        self.always_on
    }

    /// Resolve the headers for a request, or `None` when the request gets no CORS headers.
    ///
    /// An empty origin string is treated as a missing `Origin` header.
    #[must_use]
    pub fn resolve(
        &self,
        config: &CorsConfig,
        origin: Option<&str>,
        method: &Method,
    ) -> Option<CorsHeaders> {
        let origin = origin.filter(|o| !o.is_empty());

        let mut allow_origin = match origin {
            Some(_) if config.has_wildcard_origin() => WILDCARD.to_string(),
            Some(o) if config.lists_origin(o) => o.to_string(),
            Some(o) => {
                debug!(origin = %o, "CORS origin not allowed, omitting headers");
                return None;
            }
            None if self.always_on && config.has_wildcard_origin() => WILDCARD.to_string(),
            None => return None,
        };

        let mut allow_credentials = config.allow_credentials && origin.is_some();
        if allow_credentials && allow_origin == WILDCARD {
            match origin {
                Some(o) if config.lists_origin(o) => allow_origin = o.to_string(),
                _ => {
                    debug!(
                        origin = ?origin,
                        "wildcard origin cannot carry credentials, disabling credentials"
                    );
                    allow_credentials = false;
                }
            }
        }

        let allow_methods = if config.allowed_methods.is_empty() {
            DEFAULT_ALLOW_METHODS.to_string()
        } else {
            config.allowed_methods.join(",")
        };
        let allow_headers = if config.allowed_headers.is_empty() {
            DEFAULT_ALLOW_HEADERS.to_string()
        } else {
            config.allowed_headers.join(",")
        };
        let max_age = (*method == Method::OPTIONS && config.max_age > 0).then_some(config.max_age);

        Some(CorsHeaders {
            allow_origin,
            allow_methods,
            allow_headers,
            allow_credentials,
            max_age,
        })
    }

    /// Resolve and write the headers onto `res`. Returns whether anything was written.
    pub fn apply(
        &self,
        config: &CorsConfig,
        origin: Option<&str>,
        method: &Method,
        res: &mut HandlerResponse,
    ) -> bool {
        match self.resolve(config, origin, method) {
            Some(h) => {
                h.apply(res);
                true
            }
            None => false,
        }
    }
}
