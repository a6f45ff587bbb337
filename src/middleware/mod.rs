//! # Middleware Module
//!
//! Cross-cutting request processing around a [`Dispatch`](crate::dispatcher::Dispatch)
//! implementation, plus the CORS policy types the routers apply themselves.
//!
//! - [`Pipeline`] runs [`Middleware`] hooks around a router
//! - [`TracingMiddleware`] echoes the request trace id as `X-Trace-ID`
//! - [`LoggingMiddleware`] writes one structured log line per request
//! - [`cors`] holds [`CorsConfig`], [`CorsResolver`] and the header constants
//!
//! ```rust
//! use restroute::middleware::{LoggingMiddleware, Pipeline, TracingMiddleware};
//! use restroute::router::Router;
//!
//! let router = Router::new("/api");
//! let app = Pipeline::new(router)
//!     .with_middleware(TracingMiddleware)
//!     .with_middleware(LoggingMiddleware);
//! # let _ = app;
//! ```

mod core;
pub mod cors;
mod logging;
mod tracing;

pub use core::{Middleware, Pipeline};
pub use cors::{CorsConfig, CorsConfigBuilder, CorsConfigError, CorsHeaders, CorsResolver};
pub use logging::LoggingMiddleware;
pub use tracing::TracingMiddleware;
