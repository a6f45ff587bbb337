use std::collections::HashMap;

use tracing::debug;

use super::{Guard, Next};
use crate::context::RouteContext;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Authorization guard backed by a static bearer-token table.
///
/// A request whose `Authorization: Bearer <token>` names a known token gets that token's
/// identity set on its context. Anything else is answered with 401 and a
/// `www-authenticate: Bearer` header.
#[derive(Debug, Clone, Default)]
pub struct BearerTokenAuthorization {
    tokens: HashMap<String, String>,
}

impl BearerTokenAuthorization {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, identity: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), identity.into());
        self
    }

    pub fn insert(&mut self, token: impl Into<String>, identity: impl Into<String>) {
        self.tokens.insert(token.into(), identity.into());
    }

    fn identity_for(&self, req: &HandlerRequest) -> Option<&str> {
        let header = req.get_header("authorization")?;
        let (scheme, token) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        self.tokens.get(token.trim()).map(String::as_str)
    }
}

impl Guard for BearerTokenAuthorization {
    fn wrap(
        &self,
        req: &HandlerRequest,
        res: &mut HandlerResponse,
        ctx: &mut RouteContext,
        next: Next<'_>,
    ) {
        match self.identity_for(req) {
            Some(identity) => {
                ctx.set_identity(identity);
                next.run(req, res, ctx);
            }
            None => {
                debug!(path = %req.path, "bearer token missing or unknown");
                res.set_header("www-authenticate", "Bearer".to_string());
                res.set_error(401, "Unauthorized");
            }
        }
    }
}
