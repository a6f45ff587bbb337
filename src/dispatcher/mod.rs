//! # Dispatcher Module
//!
//! The request/response exchange between a host HTTP server and the router.
//!
//! ## Overview
//!
//! The router never owns a socket. A host server converts each inbound request into a
//! [`HandlerRequest`], calls [`Dispatch::dispatch`] on a [`Router`](crate::router::Router)
//! or [`MultiRouter`](crate::router::MultiRouter) (optionally wrapped in a
//! [`Pipeline`](crate::middleware::Pipeline)), and writes the returned
//! [`HandlerResponse`] back to the client.
//!
//! ```rust
//! use restroute::dispatcher::{Dispatch, HandlerRequest};
//! use restroute::router::Router;
//! use http::Method;
//!
//! let mut router = Router::new("/users");
//! router.handle_func(Method::GET, "/:id", |_req, res, ctx| {
//!     let id = ctx.params().get("id").unwrap_or_default();
//!     res.set_json(200, serde_json::json!({ "id": id }));
//! });
//!
//! let res = router.dispatch(&HandlerRequest::new(Method::GET, "/users/42"));
//! assert_eq!(res.status, 200);
//! ```
//!
//! ## Host Adapters
//!
//! Servers built on the `http` crate types can use [`HandlerRequest::from_http`] and
//! [`HandlerResponse::into_http`] instead of filling the structs by hand.
//!
//! ## Handler Contract
//!
//! A [`RouteHandler`] receives the request, the response being built and the per-request
//! [`RouteContext`](crate::context::RouteContext). CORS headers are already present on the
//! response when the handler runs; handlers add to them and never remove them, so prefer
//! [`HandlerResponse::set_json`] and [`HandlerResponse::set_error`] over replacing the
//! response wholesale.

mod core;

pub use core::{
    Dispatch, HandlerRequest, HandlerResponse, HeaderVec, ResponseBody, RouteHandler,
    MAX_INLINE_HEADERS,
};
