//! # restroute
//!
//! **restroute** is an embeddable HTTP request router. It matches requests to handlers by
//! method and templated path, runs protected routes through an authorization and
//! permission guard chain, and resolves a CORS policy before any handler runs.
//!
//! It owns no sockets. A host server converts its requests into
//! [`HandlerRequest`](dispatcher::HandlerRequest) values, calls
//! [`Dispatch::dispatch`](dispatcher::Dispatch::dispatch) and writes back the returned
//! [`HandlerResponse`](dispatcher::HandlerResponse).
//!
//! ## Architecture
//!
//! - **[`dispatcher`]** - Request/response exchange types and the handler contract
//! - **[`context`]** - Per-request params, custom data, identity and permissions
//! - **[`router`]** - Path matching, [`Router`](router::Router) and
//!   [`MultiRouter`](router::MultiRouter)
//! - **[`security`]** - The two-stage guard chain for protected routes
//! - **[`middleware`]** - CORS policy resolution, request pipeline, tracing and logging
//! - **[`json`]** - JSON response envelope
//! - **[`streaming`]** - Byte-range file handler
//! - **[`config`]** - File-based router configuration
//! - **[`logging`]** - `tracing-subscriber` setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host server
//!     participant Multi as MultiRouter
//!     participant Router as Router
//!     participant Cors as CorsResolver
//!     participant Auth as Authorization guard
//!     participant Perm as Permission guard
//!     participant Handler
//!
//!     Host->>Multi: dispatch(GET /api/users/42)
//!     Multi->>Multi: owner("/api/users/42")
//!     alt no owner
//!         Multi-->>Host: 404
//!     end
//!     Multi->>Cors: resolve(policy, origin, method)
//!     Cors-->>Multi: CORS headers or none
//!     alt OPTIONS
//!         Multi-->>Host: 200
//!     end
//!     Multi->>Router: serve
//!     Router->>Router: match_route (first registered wins)
//!     alt no match
//!         Router-->>Host: 404
//!     end
//!     alt protected route
//!         Router->>Auth: wrap(next = Perm)
//!         Auth->>Perm: next.run (identity set)
//!         Perm->>Handler: next.run (permissions held)
//!     else unprotected
//!         Router->>Handler: handle
//!     end
//!     Handler-->>Host: HandlerResponse
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use restroute::context::Permission;
//! use restroute::dispatcher::{Dispatch, HandlerRequest};
//! use restroute::middleware::CorsConfigBuilder;
//! use restroute::router::Router;
//! use restroute::security::{BearerTokenAuthorization, PermissionCheck};
//! use http::Method;
//! use std::collections::HashMap;
//!
//! let mut router = Router::new("/users");
//! router.set_cors_config(
//!     CorsConfigBuilder::new()
//!         .allowed_origins(&["https://app.example.com"])
//!         .allow_credentials(true)
//!         .build()
//!         .unwrap(),
//! );
//! router.handle_func(Method::GET, "/:id", |_req, res, ctx| {
//!     let id = ctx.params().get("id").unwrap_or_default();
//!     res.set_json(200, serde_json::json!({ "id": id }));
//! });
//! router.handle_protected_func(Method::DELETE, "/:id", &[Permission(1)], |_req, res, _ctx| {
//!     res.status = 204;
//! });
//!
//! let mut held = HashMap::new();
//! held.insert("alice".to_string(), vec![Permission(1)]);
//! router.set_authorization(BearerTokenAuthorization::new().with_token("t0k3n", "alice"));
//! router.set_permission(PermissionCheck::new(held));
//!
//! let req = HandlerRequest::new(Method::DELETE, "/users/42")
//!     .with_header("Origin", "https://app.example.com")
//!     .with_header("Authorization", "Bearer t0k3n");
//! let res = router.dispatch(&req);
//! assert_eq!(res.status, 204);
//! assert_eq!(
//!     res.get_header("access-control-allow-origin"),
//!     Some("https://app.example.com")
//! );
//! ```
//!
//! ## Concurrency
//!
//! Registration takes `&mut self` and dispatch takes `&self`, so routers are configured
//! before they are shared. All router types are `Send + Sync`; per-request state is created
//! fresh on every dispatch.

pub mod cli;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod ids;
pub mod json;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod security;
pub mod streaming;

pub use context::{Permission, RouteContext};
pub use dispatcher::{Dispatch, HandlerRequest, HandlerResponse, RouteHandler};
pub use middleware::{CorsConfig, CorsResolver};
pub use router::{MultiRouter, Router, RouterError};
