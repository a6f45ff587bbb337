use crate::context::RouteContext;
use crate::dispatcher::{HandlerRequest, HandlerResponse, RouteHandler};

/// The rest of the chain, handed to a [`Guard`].
///
/// Consumed by [`Next::run`], so a guard can continue the chain at most once.
pub struct Next<'a> {
    inner: &'a dyn RouteHandler,
}

impl<'a> Next<'a> {
    pub fn new(inner: &'a dyn RouteHandler) -> Self {
        Self { inner }
    }

    pub fn run(self, req: &HandlerRequest, res: &mut HandlerResponse, ctx: &mut RouteContext) {
        self.inner.handle(req, res, ctx)
    }
}

/// One stage of the protected-route chain.
pub trait Guard: Send + Sync {
    fn wrap(
        &self,
        req: &HandlerRequest,
        res: &mut HandlerResponse,
        ctx: &mut RouteContext,
        next: Next<'_>,
    );
}

/// A guard built from a closure, see [`guard_fn`]
pub struct FnGuard<F>(F);

impl<F> Guard for FnGuard<F>
where
    F: Fn(&HandlerRequest, &mut HandlerResponse, &mut RouteContext, Next<'_>) + Send + Sync,
{
    fn wrap(
        &self,
        req: &HandlerRequest,
        res: &mut HandlerResponse,
        ctx: &mut RouteContext,
        next: Next<'_>,
    ) {
        (self.0)(req, res, ctx, next)
    }
}

/// Adapt a closure into a [`Guard`].
///
/// ```rust
/// use restroute::security::guard_fn;
///
/// let api_key = guard_fn(|req, res, ctx, next| match req.get_header("x-api-key") {
///     Some("secret") => {
///         ctx.set_identity("service");
///         next.run(req, res, ctx);
///     }
///     _ => res.set_error(401, "Unauthorized"),
/// });
/// # let _ = api_key;
/// ```
pub fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&HandlerRequest, &mut HandlerResponse, &mut RouteContext, Next<'_>) + Send + Sync,
{
    FnGuard(f)
}

struct Guarded<'a> {
    guard: &'a dyn Guard,
    inner: &'a dyn RouteHandler,
}

impl RouteHandler for Guarded<'_> {
    fn handle(&self, req: &HandlerRequest, res: &mut HandlerResponse, ctx: &mut RouteContext) {
        self.guard.wrap(req, res, ctx, Next::new(self.inner))
    }
}

/// Run `handler` behind the authorization guard and then the permission guard.
pub fn run_guarded(
    authorization: &dyn Guard,
    permission: &dyn Guard,
    handler: &dyn RouteHandler,
    req: &HandlerRequest,
    res: &mut HandlerResponse,
    ctx: &mut RouteContext,
) {
    let permitted = Guarded {
        guard: permission,
        inner: handler,
    };
    authorization.wrap(req, res, ctx, Next::new(&permitted));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use std::sync::Mutex;

    fn recording(log: &'static Mutex<Vec<&'static str>>, name: &'static str, pass: bool) -> impl Guard {
        guard_fn(move |req, res, ctx, next| {
            log.lock().unwrap().push(name);
            if pass {
                next.run(req, res, ctx);
            } else {
                res.set_error(401, name);
            }
        })
    }

    #[test]
    fn test_authorization_runs_before_permission() {
        static LOG: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());
        let handler = |_: &HandlerRequest, res: &mut HandlerResponse, _: &mut RouteContext| {
            LOG.lock().unwrap().push("handler");
            res.status = 200;
        };
        let mut res = HandlerResponse::new(0);
        run_guarded(
            &recording(&LOG, "auth", true),
            &recording(&LOG, "perm", true),
            &handler,
            &HandlerRequest::new(Method::GET, "/"),
            &mut res,
            &mut RouteContext::default(),
        );
        assert_eq!(*LOG.lock().unwrap(), vec!["auth", "perm", "handler"]);
        assert_eq!(res.status, 200);
    }

    #[test]
    fn test_rejection_stops_the_chain() {
        static LOG: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());
        let handler = |_: &HandlerRequest, _: &mut HandlerResponse, _: &mut RouteContext| {
            LOG.lock().unwrap().push("handler");
        };
        let mut res = HandlerResponse::new(200);
        run_guarded(
            &recording(&LOG, "auth", false),
            &recording(&LOG, "perm", true),
            &handler,
            &HandlerRequest::new(Method::GET, "/"),
            &mut res,
            &mut RouteContext::default(),
        );
        assert_eq!(*LOG.lock().unwrap(), vec!["auth"]);
        assert_eq!(res.status, 401);
    }
}
