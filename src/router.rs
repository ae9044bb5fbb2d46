//! Radix-tree request router with a middleware stack.
//!
//! One tree per HTTP method, O(path-length) lookup. Middleware registered with
//! [`Router::layer`] wraps every matched route.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::level_filters::LevelFilter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{self, BoxedMiddleware, Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::scope::Scope;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Every builder method returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    layers: Vec<BoxedMiddleware>,
    log_level: Option<LevelFilter>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), layers: Vec::new(), log_level: None }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use cairn::{Method, Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn create_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/users/{id}", get_user)
    ///     .on(Method::Post, "/users",      create_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Appends a middleware. The first layer added runs outermost.
    pub fn layer(mut self, layer: impl Middleware) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    /// Pins the verbosity used to decide, per request, whether trace logging
    /// is on. Without it the active `tracing` subscriber is asked.
    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = Some(level);
        self
    }

    pub(crate) fn into_service(self) -> Service {
        Service {
            routes: self.routes,
            layers: self.layers.into(),
            log_level: self.log_level,
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// A frozen [`Router`], shared by every connection.
pub(crate) struct Service {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    layers: Arc<[BoxedMiddleware]>,
    log_level: Option<LevelFilter>,
}

impl Service {
    /// Routes `req` and runs it through the middleware stack.
    pub(crate) async fn dispatch(&self, mut req: Request) -> Response {
        let Some(tree) = self.routes.get(&req.method) else {
            return Response::status(Status::NotFound);
        };
        let Ok(matched) = tree.at(&req.path) else {
            return Response::status(Status::NotFound);
        };

        let endpoint = Arc::clone(matched.value);
        req.params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        req.scope = Scope::entry(self.trace_enabled());

        Next::new(Arc::clone(&self.layers), endpoint).run(req).await
    }

    fn trace_enabled(&self) -> bool {
        match self.log_level {
            Some(level) => level >= LevelFilter::TRACE,
            None => middleware::trace_enabled(),
        }
    }
}
