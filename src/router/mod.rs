//! # Router Module
//!
//! Path matching, route tables and router aggregation.
//!
//! ## Overview
//!
//! A [`Router`] owns an ordered table of routes registered under one base path. A path
//! template is split on `/`; a segment starting with `:` captures the request segment at
//! the same position under that name, every other segment must match literally. A request
//! matches a route when the methods are equal, the segment counts are equal and every
//! literal agrees. The first matching route in registration order wins.
//!
//! A [`MultiRouter`] groups routers under a shared prefix and hands each request to the
//! one member that owns it.
//!
//! ## Dispatch
//!
//! Both types implement [`Dispatch`](crate::dispatcher::Dispatch):
//!
//! 1. CORS headers are resolved and written first
//! 2. `OPTIONS` requests stop there with 200
//! 3. No matching route gives 404
//! 4. Protected routes run the authorization guard, then the permission guard
//! 5. The handler runs with a fresh [`RouteContext`](crate::context::RouteContext)
//!
//! ## Example
//!
//! ```rust
//! use restroute::dispatcher::{Dispatch, HandlerRequest};
//! use restroute::router::{MultiRouter, Router};
//! use http::Method;
//!
//! let mut users = Router::new("/users");
//! users.handle_func(Method::GET, "/:id", |_req, res, ctx| {
//!     let id = ctx.params().get("id").unwrap_or_default();
//!     res.set_json(200, serde_json::json!({ "id": id }));
//! });
//!
//! let api = MultiRouter::new("/api", vec![users]).unwrap();
//! assert_eq!(api.list_routes(), vec!["GET /api/users/:id"]);
//! assert_eq!(api.dispatch(&HandlerRequest::new(Method::GET, "/api/users/7")).status, 200);
//! ```

mod core;
mod error;
mod multi;
mod route;

pub use core::{RouteMatch, Router};
pub use error::RouterError;
pub use multi::MultiRouter;
pub use route::{Route, Segment};
