//! # Security Module
//!
//! The two-stage guard chain that runs in front of protected routes.
//!
//! ## Overview
//!
//! A [`Router`](crate::router::Router) holds two guard slots: an authorization guard that
//! resolves who is calling, and a permission guard that decides whether that caller holds
//! the permissions the route requires. For a protected route the router runs
//!
//! ```text
//! authorization.wrap(.., next = permission.wrap(.., next = handler))
//! ```
//!
//! A guard either calls `next.run(..)` or writes a rejection onto the response and
//! returns. A rejection is final: later guards and the handler never run.
//!
//! ## Guards
//!
//! - [`BearerTokenAuthorization`] maps `Authorization: Bearer <token>` to an identity
//! - [`PermissionCheck`] looks up held permissions through a [`PermissionSource`]
//! - [`guard_fn`] adapts a closure
//!
//! ```rust
//! use restroute::context::Permission;
//! use restroute::router::Router;
//! use restroute::security::{BearerTokenAuthorization, PermissionCheck};
//! use std::collections::HashMap;
//!
//! let mut held = HashMap::new();
//! held.insert("alice".to_string(), vec![Permission(1)]);
//!
//! let mut router = Router::new("/admin");
//! router.set_authorization(BearerTokenAuthorization::new().with_token("t0k3n", "alice"));
//! router.set_permission(PermissionCheck::new(held));
//! ```

mod bearer;
mod chain;
mod permission;

pub use bearer::BearerTokenAuthorization;
pub use chain::{guard_fn, run_guarded, FnGuard, Guard, Next};
pub use permission::{PermissionCheck, PermissionSource};
