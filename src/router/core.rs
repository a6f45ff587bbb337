use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, error, info};

use super::route::Route;
use crate::context::{Permission, RouteContext, RouteParams};
use crate::dispatcher::{Dispatch, HandlerRequest, HandlerResponse, RouteHandler};
use crate::middleware::cors::{CorsConfig, CorsResolver};
use crate::security::{run_guarded, Guard};

/// Request path segments, stack-allocated for typical depths
type PathSegments<'a> = SmallVec<[&'a str; 16]>;

pub(crate) fn split_path(path: &str) -> PathSegments<'_> {
    path.split('/').collect()
}

/// Result of successfully matching a request path to a route
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    /// Values captured from `:name` segments
    pub params: RouteParams,
}

impl RouteMatch<'_> {
    /// Fresh per-request context carrying the params and the route's required permissions
    #[must_use]
    pub fn into_context(self) -> RouteContext {
        RouteContext::new(self.params, self.route.required_permissions().to_vec())
    }
}

/// Matches requests against an ordered route table under one base path.
///
/// Routes are scanned in registration order and the first one whose method, segment
/// count and literal segments all agree wins. There is no specificity ranking, so
/// `/users/me` must be registered before `/users/:id` to be reachable.
///
/// A router is configured through `&mut self` and served through `&self`; register every
/// route and guard before sharing it with request threads.
pub struct Router {
    base_path: String,
    routes: Vec<Route>,
    cors_config: Option<CorsConfig>,
    cors: CorsResolver,
    authorization: Option<Arc<dyn Guard>>,
    permission: Option<Arc<dyn Guard>>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("base_path", &self.base_path)
            .field("routes", &self.routes)
            .field("cors_config", &self.cors_config)
            .field("cors", &self.cors)
            .field("authorization", &self.authorization.is_some())
            .field("permission", &self.permission.is_some())
            .finish()
    }
}

impl Router {
    /// Create a router serving under `base_path`. A non-empty base path without a leading
    /// `/` gets one, so `"orders"` and `"/orders"` are the same router.
    #[must_use]
    pub fn new(base_path: impl Into<String>) -> Self {
        let mut base_path = base_path.into();
        if !base_path.is_empty() && !base_path.starts_with('/') {
            base_path.insert(0, '/');
        }
        Self {
            base_path,
            routes: Vec::new(),
            cors_config: None,
            cors: CorsResolver::default(),
            authorization: None,
            permission: None,
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// `base_path` without its trailing `/`, joined to `path`. Registering `/` stores the
    /// base path itself.
    fn full_template(&self, path: &str) -> String {
        if path == "/" {
            if self.base_path.is_empty() {
                return "/".to_string();
            }
            return self.base_path.clone();
        }
        format!("{}{}", self.base_path.trim_end_matches('/'), path)
    }

    fn register(
        &mut self,
        method: Method,
        path: &str,
        required_permissions: Vec<Permission>,
        protected: bool,
        handler: Arc<dyn RouteHandler>,
    ) {
        let template = self.full_template(path);
        info!(
            method = %method,
            template = %template,
            protected,
            "route registered"
        );
        self.routes.push(Route::new(
            method,
            template,
            required_permissions,
            protected,
            handler,
        ));
    }

    /// Register a closure for an unprotected route
    pub fn handle_func<F>(&mut self, method: Method, path: &str, handler: F)
    where
        F: Fn(&HandlerRequest, &mut HandlerResponse, &mut RouteContext) + Send + Sync + 'static,
    {
        self.register(method, path, Vec::new(), false, Arc::new(handler));
    }

    /// Register a [`RouteHandler`] for an unprotected route
    pub fn handle<H: RouteHandler + 'static>(&mut self, method: Method, path: &str, handler: H) {
        self.register(method, path, Vec::new(), false, Arc::new(handler));
    }

    /// Register a closure behind the authorization and permission guards
    pub fn handle_protected_func<F>(
        &mut self,
        method: Method,
        path: &str,
        required_permissions: &[Permission],
        handler: F,
    ) where
        F: Fn(&HandlerRequest, &mut HandlerResponse, &mut RouteContext) + Send + Sync + 'static,
    {
        self.register(
            method,
            path,
            required_permissions.to_vec(),
            true,
            Arc::new(handler),
        );
    }

    /// Register a [`RouteHandler`] behind the authorization and permission guards
    pub fn handle_protected<H: RouteHandler + 'static>(
        &mut self,
        method: Method,
        path: &str,
        required_permissions: &[Permission],
        handler: H,
    ) {
        self.register(
            method,
            path,
            required_permissions.to_vec(),
            true,
            Arc::new(handler),
        );
    }

    pub fn set_cors_config(&mut self, config: CorsConfig) {
        self.cors_config = Some(config);
    }

    pub(crate) fn clear_cors_config(&mut self) {
        self.cors_config = None;
    }

    #[must_use]
    pub fn cors_config(&self) -> Option<&CorsConfig> {
        self.cors_config.as_ref()
    }

    pub fn set_cors_resolver(&mut self, resolver: CorsResolver) {
        self.cors = resolver;
    }

    #[must_use]
    pub fn with_cors_resolver(mut self, resolver: CorsResolver) -> Self {
        self.cors = resolver;
        self
    }

    #[must_use]
    pub fn cors_resolver(&self) -> CorsResolver {
        self.cors
    }

    pub fn set_authorization(&mut self, guard: impl Guard + 'static) {
        self.authorization = Some(Arc::new(guard));
    }

    pub fn set_permission(&mut self, guard: impl Guard + 'static) {
        self.permission = Some(Arc::new(guard));
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// `METHOD /template` for every route, in registration order
    #[must_use]
    pub fn list_routes(&self) -> Vec<String> {
        self.routes.iter().map(ToString::to_string).collect()
    }

    pub(crate) fn rebase(&mut self, prefix: &str) {
        for route in &mut self.routes {
            route.rebase(prefix);
        }
    }

    /// Find the first route matching `method` and `path`
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let segments = split_path(path);
        self.routes.iter().find_map(|route| {
            route
                .matches(method, &segments)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// Apply this router's CORS policy, falling back to the permissive default.
    pub(crate) fn apply_cors(&self, req: &HandlerRequest, res: &mut HandlerResponse) {
        match &self.cors_config {
            Some(config) => {
                self.cors
                    .apply(config, req.get_header("origin"), &req.method, res);
            }
            None => {
                self.cors.apply(
                    &CorsConfig::permissive(),
                    req.get_header("origin"),
                    &req.method,
                    res,
                );
            }
        }
    }

    /// Route matching and handler invocation, after CORS has been applied.
    pub(crate) fn serve(&self, req: &HandlerRequest, res: &mut HandlerResponse) {
        let Some(matched) = self.match_route(&req.method, &req.path) else {
            debug!(method = %req.method, path = %req.path, "no route matched");
            res.set_error(404, "Not Found");
            return;
        };
        let route = matched.route;
        debug!(
            method = %req.method,
            path = %req.path,
            template = %route.template(),
            "route matched"
        );
        let mut ctx = matched.into_context();

        if !route.is_protected() {
            route.handler().handle(req, res, &mut ctx);
            return;
        }

        let (Some(authorization), Some(permission)) = (&self.authorization, &self.permission)
        else {
            let missing = if self.authorization.is_none() {
                "Router authorization guard is not set"
            } else {
                "Router permission guard is not set"
            };
            error!(
                template = %route.template(),
                base_path = %self.base_path,
                "{}", missing
            );
            res.set_error(500, missing);
            return;
        };
        run_guarded(
            authorization.as_ref(),
            permission.as_ref(),
            route.handler(),
            req,
            res,
            &mut ctx,
        );
    }
}

impl Dispatch for Router {
    fn dispatch(&self, req: &HandlerRequest) -> HandlerResponse {
        let mut res = HandlerResponse::new(200);
        self.apply_cors(req, &mut res);
        if req.method == Method::OPTIONS {
            return res;
        }
        self.serve(req, &mut res);
        res
    }
}
