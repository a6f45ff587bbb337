use http::Method;
use tracing::{debug, info};

use super::{Router, RouterError};
use crate::dispatcher::{Dispatch, HandlerRequest, HandlerResponse};
use crate::middleware::cors::{CorsConfig, CorsResolver};

/// Aggregates routers under a shared base path.
///
/// Each member owns the requests whose first segment after the aggregate base path equals
/// the member's own base path. Ownership is decided by path alone: an owned request with
/// no route for its method is a 404, never a fall-through to another member.
#[derive(Debug)]
pub struct MultiRouter {
    base_path: String,
    routers: Vec<Router>,
    cors_config: Option<CorsConfig>,
    cors: CorsResolver,
}

impl MultiRouter {
    /// Adopt `routers`, prefixing every member route template with `base_path`.
    pub fn new(base_path: impl Into<String>, mut routers: Vec<Router>) -> Result<Self, RouterError> {
        let mut base_path = base_path.into();
        if base_path.is_empty() || base_path == "/" {
            return Err(RouterError::InvalidBasePath { base_path });
        }
        if !base_path.starts_with('/') {
            base_path.insert(0, '/');
        }
        let prefix = base_path.trim_end_matches('/');
        for router in &mut routers {
            router.rebase(prefix);
        }
        info!(
            base_path = %base_path,
            routers = routers.len(),
            "multi-router assembled"
        );
        Ok(Self {
            base_path,
            routers,
            cors_config: None,
            cors: CorsResolver::default(),
        })
    }

    /// Like [`MultiRouter::new`], with one CORS policy for every member.
    ///
    /// Member policies are cleared so the aggregate policy is the only one in effect.
    pub fn with_cors(
        base_path: impl Into<String>,
        mut routers: Vec<Router>,
        config: CorsConfig,
    ) -> Result<Self, RouterError> {
        for router in &mut routers {
            router.clear_cors_config();
        }
        let mut multi = Self::new(base_path, routers)?;
        multi.cors_config = Some(config);
        Ok(multi)
    }

    #[must_use]
    pub fn with_cors_resolver(mut self, resolver: CorsResolver) -> Self {
        self.cors = resolver;
        self
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    #[must_use]
    pub fn cors_config(&self) -> Option<&CorsConfig> {
        self.cors_config.as_ref()
    }

    /// Every member route as `METHOD /template`, members in order
    #[must_use]
    pub fn list_routes(&self) -> Vec<String> {
        self.routers.iter().flat_map(Router::list_routes).collect()
    }

    /// The member that owns `path`, if any.
    #[must_use]
    pub fn owner(&self, path: &str) -> Option<&Router> {
        let prefix = self.base_path.trim_end_matches('/');
        let rest = path.strip_prefix(prefix)?;
        let first = match rest {
            "" => "",
            _ => rest.strip_prefix('/')?.split('/').next().unwrap_or_default(),
        };
        self.routers
            .iter()
            .find(|r| r.base_path().trim_matches('/') == first)
    }
}

impl Dispatch for MultiRouter {
    fn dispatch(&self, req: &HandlerRequest) -> HandlerResponse {
        let Some(router) = self.owner(&req.path) else {
            debug!(path = %req.path, base_path = %self.base_path, "no router owns path");
            return HandlerResponse::error(404, "Not Found");
        };

        let mut res = HandlerResponse::new(200);
        match &self.cors_config {
            Some(config) => {
                self.cors
                    .apply(config, req.get_header("origin"), &req.method, &mut res);
            }
            None => router.apply_cors(req, &mut res),
        }
        if req.method == Method::OPTIONS {
            return res;
        }
        router.serve(req, &mut res);
        res
    }
}
