//! Middleware layer.
//!
//! Middleware wraps "the rest of the chain" and is the place for
//! cross-cutting concerns. Each layer receives the request and a [`Next`],
//! does its pre-processing, then either calls `next.run(req)` or stops the
//! chain by returning an [`Abort`].
//!
//! Stopping is never silent. An `Abort` names its reason, and the chain turns
//! it into a real response ([`Abort::status`]) so the client always gets an
//! answer.
//!
//! Built-in middleware:
//! - [`Correlate`]: attaches a correlation id and content type to the request scope
//! - [`TraceLog`]: trace-level begin/complete events per request
//! - [`PathDecode`]: percent-decodes captured path parameters
//!
//! ```rust,no_run
//! use cairn::{Request, Response, Router};
//! use cairn::middleware::{Correlate, PathDecode, TraceLog};
//!
//! # async fn get_user(_: Request) -> Response { Response::text("") }
//! let app = Router::new()
//!     .layer(Correlate::new())
//!     .layer(TraceLog::new())
//!     .layer(PathDecode)
//!     .get("/users/{id}", get_user);
//! ```
//!
//! Layers run in registration order: the first one added is the outermost.

mod correlation;
mod path;
mod trace;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

pub use crate::handler::BoxFuture;
pub use correlation::{CORRELATION_HEADER, Correlate};
pub use path::{DecodeError, PathDecode, decode_path_segment};
pub use trace::TraceLog;

pub(crate) use trace::trace_enabled;

/// What a middleware hands back: the response to send, or the reason it
/// stopped the chain.
pub type Outcome = Result<Response, Abort>;

/// A reason for stopping the chain before the handler ran.
#[derive(Debug)]
pub enum Abort {
    /// The layer chose not to handle the request at all
    /// (e.g. [`TraceLog`] while trace logging is off).
    Skipped,
    /// A captured path parameter was not valid percent-encoding.
    MalformedParam {
        name: String,
        value: String,
        error: DecodeError,
    },
}

impl Abort {
    /// The status the client receives for this abort.
    pub fn status(&self) -> Status {
        match self {
            Self::Skipped => Status::NoContent,
            Self::MalformedParam { .. } => Status::BadRequest,
        }
    }
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("request skipped"),
            Self::MalformedParam { name, error, .. } => {
                write!(f, "invalid path parameter `{name}`: {error}")
            }
        }
    }
}

impl std::error::Error for Abort {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Skipped => None,
            Self::MalformedParam { error, .. } => Some(error),
        }
    }
}

impl IntoResponse for Abort {
    fn into_response(self) -> Response {
        match self {
            Self::Skipped => Response::status(self.status()),
            Self::MalformedParam { .. } => Response::builder()
                .status(self.status())
                .text(self.to_string()),
        }
    }
}

/// A request interceptor.
///
/// Implement this for a struct, or wrap an async closure with [`from_fn`].
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture<Outcome>;
}

/// A type-erased middleware shared across concurrent requests.
pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// The remainder of the chain: the layers not yet run, then the handler.
pub struct Next {
    stack: Arc<[BoxedMiddleware]>,
    index: usize,
    endpoint: BoxedHandler,
}

impl Next {
    pub(crate) fn new(stack: Arc<[BoxedMiddleware]>, endpoint: BoxedHandler) -> Self {
        Self { stack, index: 0, endpoint }
    }

    /// Runs the rest of the chain.
    ///
    /// An [`Abort`] from any inner layer is converted into its response here,
    /// so callers always get something they can send.
    pub async fn run(self, req: Request) -> Response {
        let Some(layer) = self.stack.get(self.index).cloned() else {
            return self.endpoint.call(req).await;
        };

        let next = Self {
            stack: self.stack,
            index: self.index + 1,
            endpoint: self.endpoint,
        };

        match layer.call(req, next).await {
            Ok(res) => res,
            Err(abort) => {
                debug!(status = u16::from(abort.status()), reason = %abort, "request aborted");
                abort.into_response()
            }
        }
    }
}

/// Builds a [`Middleware`] from an async function.
///
/// ```rust
/// use cairn::middleware::{self, Next, Outcome};
/// use cairn::{Request, Router};
///
/// async fn stamp(req: Request, next: Next) -> Outcome {
///     let mut res = next.run(req).await;
///     res.insert_header("x-served-by", "cairn");
///     Ok(res)
/// }
///
/// let app = Router::new().layer(middleware::from_fn(stamp));
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome> + Send + 'static,
{
    FromFn(f)
}

/// Middleware returned by [`from_fn`].
pub struct FromFn<F>(F);

impl<F, Fut> Middleware for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome> + Send + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture<Outcome> {
        Box::pin((self.0)(req, next))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::testing::{get, spy};

    fn chain(layers: Vec<BoxedMiddleware>, endpoint: BoxedHandler) -> Next {
        Next::new(layers.into(), endpoint)
    }

    #[tokio::test]
    async fn empty_chain_calls_the_handler() {
        let (endpoint, calls) = spy();

        let res = chain(vec![], endpoint).run(get("/")).await;

        assert_eq!(res.status_code(), 200);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn layers_run_outermost_first() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let layer = |tag: &'static str| -> BoxedMiddleware {
            let order = Arc::clone(&order);
            Arc::new(from_fn(move |req, next: Next| {
                let order = Arc::clone(&order);
                async move {
                    order.lock().unwrap().push(tag);
                    Ok(next.run(req).await)
                }
            }))
        };
        let (endpoint, _) = spy();

        chain(vec![layer("outer"), layer("inner")], endpoint).run(get("/")).await;

        assert_eq!(*order.lock().unwrap(), ["outer", "inner"]);
    }

    #[tokio::test]
    async fn abort_becomes_a_response_and_skips_the_handler() {
        let (endpoint, calls) = spy();
        let stop: BoxedMiddleware = Arc::new(from_fn(|_req, _next| async { Err(Abort::Skipped) }));

        let res = chain(vec![stop], endpoint).run(get("/")).await;

        assert_eq!(res.status_code(), 204);
        assert!(res.body().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn inner_abort_is_visible_to_outer_layers_as_a_response() {
        let seen = Arc::new(AtomicUsize::new(0));
        let outer: BoxedMiddleware = {
            let seen = Arc::clone(&seen);
            Arc::new(from_fn(move |req, next: Next| {
                let seen = Arc::clone(&seen);
                async move {
                    let res = next.run(req).await;
                    seen.store(res.status_code().into(), Ordering::SeqCst);
                    Ok(res)
                }
            }))
        };
        let inner: BoxedMiddleware = Arc::new(from_fn(|_req, _next| async {
            Err(Abort::MalformedParam {
                name: "id".into(),
                value: "%zz".into(),
                error: DecodeError::InvalidEscape("%zz".into()),
            })
        }));
        let (endpoint, _) = spy();

        let res = chain(vec![outer, inner], endpoint).run(get("/")).await;

        assert_eq!(res.status_code(), 400);
        assert_eq!(seen.load(Ordering::SeqCst), 400);
    }
}
