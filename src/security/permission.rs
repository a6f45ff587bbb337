use std::collections::HashMap;

use tracing::warn;

use super::{Guard, Next};
use crate::context::{Permission, RouteContext};
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Host-supplied lookup of the permissions an identity holds.
pub trait PermissionSource: Send + Sync {
    fn permissions_for(&self, identity: &str) -> Vec<Permission>;
}

impl PermissionSource for HashMap<String, Vec<Permission>> {
    fn permissions_for(&self, identity: &str) -> Vec<Permission> {
        self.get(identity).cloned().unwrap_or_default()
    }
}

impl<F> PermissionSource for F
where
    F: Fn(&str) -> Vec<Permission> + Send + Sync,
{
    fn permissions_for(&self, identity: &str) -> Vec<Permission> {
        self(identity)
    }
}

/// Permission guard: continues only when the caller holds every permission the route requires.
///
/// Without an identity on the context the request is answered with 401; with an identity
/// that lacks a permission, with 403.
#[derive(Debug, Clone)]
pub struct PermissionCheck<S> {
    source: S,
}

impl<S: PermissionSource> PermissionCheck<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: PermissionSource> Guard for PermissionCheck<S> {
    fn wrap(
        &self,
        req: &HandlerRequest,
        res: &mut HandlerResponse,
        ctx: &mut RouteContext,
        next: Next<'_>,
    ) {
        let held = match ctx.identity() {
            Ok(identity) => self.source.permissions_for(identity),
            Err(_) => {
                res.set_error(401, "Unauthorized");
                return;
            }
        };
        if ctx.has_required_permissions(&held) {
            next.run(req, res, ctx);
        } else {
            warn!(
                path = %req.path,
                identity = ctx.identity().unwrap_or_default(),
                required = ?ctx.required_permissions(),
                "permission denied"
            );
            res.set_error(403, "Forbidden");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RouteParams;
    use crate::dispatcher::RouteHandler;
    use http::Method;

    fn run(identity: Option<&str>, required: Vec<Permission>) -> HandlerResponse {
        let guard = PermissionCheck::new(|id: &str| {
            if id == "alice" {
                vec![Permission(2)]
            } else {
                vec![]
            }
        });
        let handler = |_: &HandlerRequest, res: &mut HandlerResponse, _: &mut RouteContext| {
            res.status = 204;
        };
        let mut ctx = RouteContext::new(RouteParams::new(), required);
        if let Some(id) = identity {
            ctx.set_identity(id);
        }
        let mut res = HandlerResponse::new(200);
        guard.wrap(
            &HandlerRequest::new(Method::GET, "/"),
            &mut res,
            &mut ctx,
            Next::new(&handler as &dyn RouteHandler),
        );
        res
    }

    #[test]
    fn test_missing_permission_is_403() {
        assert_eq!(run(Some("alice"), vec![Permission(1)]).status, 403);
    }

    #[test]
    fn test_held_permission_passes() {
        assert_eq!(run(Some("alice"), vec![Permission(2)]).status, 204);
    }

    #[test]
    fn test_empty_requirement_passes_any_identity() {
        assert_eq!(run(Some("bob"), vec![]).status, 204);
    }

    #[test]
    fn test_no_identity_is_401() {
        assert_eq!(run(None, vec![]).status, 401);
    }

    #[test]
    fn test_map_source() {
        let mut map = HashMap::new();
        map.insert("alice".to_string(), vec![Permission(5)]);
        assert_eq!(map.permissions_for("alice"), vec![Permission(5)]);
        assert!(map.permissions_for("bob").is_empty());
    }
}
