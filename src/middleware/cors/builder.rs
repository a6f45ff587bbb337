use http::Method;

use super::{CorsConfig, CorsConfigError};

/// Builder for [`CorsConfig`] with a fluent API
///
/// # Example
///
/// ```rust
/// use restroute::middleware::CorsConfigBuilder;
/// use http::Method;
///
/// let cors = CorsConfigBuilder::new()
///     .allowed_origins(&["https://example.com", "https://api.example.com"])
///     .allowed_methods(&[Method::GET, Method::POST])
///     .allowed_headers(&["Content-Type", "X-Custom-Header"])
///     .allow_credentials(true)
///     .max_age(3600)
///     .build()
///     .unwrap();
/// assert!(cors.allow_credentials);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CorsConfigBuilder {
    config: CorsConfig,
}

impl CorsConfigBuilder {
    /// Start from an empty policy: no origins, default methods and headers at resolve time,
    /// no credentials, no preflight caching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set allowed origins. `"*"` is the wildcard token.
    pub fn allowed_origins(mut self, origins: &[&str]) -> Self {
        self.config.allowed_origins = origins.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn allowed_methods(mut self, methods: &[Method]) -> Self {
        self.config.allowed_methods = methods.iter().map(|m| m.as_str().to_string()).collect();
        self
    }

    pub fn allowed_headers(mut self, headers: &[&str]) -> Self {
        self.config.allowed_headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Enable or disable `Access-Control-Allow-Credentials: true` for requests with an origin.
    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.config.allow_credentials = allow;
        self
    }

    /// Preflight cache duration in seconds. Zero disables the header.
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.config.max_age = seconds;
        self
    }

    /// Validate and return the policy.
    pub fn build(self) -> Result<CorsConfig, CorsConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
