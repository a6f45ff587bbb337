use std::time::{Duration, Instant};

use crate::dispatcher::{Dispatch, HandlerRequest, HandlerResponse};

pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}

/// Wraps a [`Dispatch`] implementation with an ordered list of middleware.
///
/// `before` hooks run in registration order and the first early response replaces the
/// inner dispatch. Every `after` hook then runs on whichever response was produced.
pub struct Pipeline<D: Dispatch> {
    inner: D,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl<D: Dispatch> Pipeline<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            middlewares: Vec::new(),
        }
    }

    pub fn add_middleware(&mut self, mw: impl Middleware + 'static) {
        self.middlewares.push(Box::new(mw));
    }

    #[must_use]
    pub fn with_middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.add_middleware(mw);
        self
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Dispatch> Dispatch for Pipeline<D> {
    fn dispatch(&self, req: &HandlerRequest) -> HandlerResponse {
        let start = Instant::now();
        let early = self.middlewares.iter().find_map(|mw| mw.before(req));
        let mut res = early.unwrap_or_else(|| self.inner.dispatch(req));
        let latency = start.elapsed();
        for mw in &self.middlewares {
            mw.after(req, &mut res, latency);
        }
        res
    }
}
