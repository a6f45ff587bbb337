//! # Context Module
//!
//! Per-request state created by the matching [`Router`](crate::router::Router) and handed
//! to the guard chain and the handler.
//!
//! A [`RouteContext`] carries the captured path parameters, an open map for handler-defined
//! data, the identity resolved by the authorization guard, and the permissions the matched
//! route requires. Nothing in it outlives the request.

mod core;

pub use core::{
    ContextError, CustomData, ParamVec, Permission, RouteContext, RouteParams, MAX_INLINE_PARAMS,
};
