//! Correlation-id propagation.

use http::HeaderName;
use http::header::CONTENT_TYPE;
use uuid::Uuid;

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next, Outcome};
use crate::request::Request;

/// Header carrying the correlation identifier, inbound and outbound.
pub const CORRELATION_HEADER: &str = "X-Correlation-ID";

/// Attaches a correlation id and the inbound content type to the request
/// scope, then forwards. Never stops the chain.
///
/// The id is taken from the correlation header when the caller sent a
/// non-empty one, and is a fresh UUID v4 otherwise. The content type is the
/// raw `Content-Type` header, or `""`. Non-ASCII header bytes are kept.
///
/// By default the id is also written back on the response under the same
/// header, so callers can quote it when reporting a problem.
#[derive(Clone, Debug)]
pub struct Correlate {
    header: HeaderName,
    echo: bool,
}

impl Correlate {
    pub fn new() -> Self {
        Self { header: HeaderName::from_static("x-correlation-id"), echo: true }
    }

    /// Reads (and echoes) the correlation id under `name` instead of
    /// [`CORRELATION_HEADER`].
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid HTTP header name.
    pub fn header(mut self, name: &str) -> Self {
        self.header = HeaderName::from_bytes(name.as_bytes())
            .unwrap_or_else(|e| panic!("invalid correlation header name `{name}`: {e}"));
        self
    }

    /// Whether to copy the correlation id onto the response. On by default.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl Default for Correlate {
    fn default() -> Self { Self::new() }
}

impl Middleware for Correlate {
    fn call(&self, mut req: Request, next: Next) -> BoxFuture<Outcome> {
        let id = req
            .header_lossy(&self.header)
            .filter(|v| !v.is_empty())
            .map(|v| v.into_owned())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let content_type = req
            .header_lossy(CONTENT_TYPE)
            .map(|v| v.into_owned())
            .unwrap_or_default();

        let scope = req.scope().clone()
            .with_correlation_id(id.clone())
            .with_content_type(content_type);
        req.set_scope(scope);

        let header = self.echo.then(|| self.header.clone());
        Box::pin(async move {
            let mut res = next.run(req).await;
            if let Some(header) = header {
                res.insert_header(header.as_str(), &id);
            }
            Ok(res)
        })
    }
}
