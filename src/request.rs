//! Incoming HTTP request type.

use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;
use http::header::AsHeaderName;

use crate::method::Method;
use crate::scope::Scope;

/// An incoming HTTP request, as seen by middleware and handlers.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) scope: Scope,
}

impl Request {
    pub(crate) fn new(method: Method, path: String, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            path,
            headers,
            body,
            params: HashMap::new(),
            scope: Scope::default(),
        }
    }

    pub fn method(&self) -> Method { self.method }

    /// The request path exactly as received, percent-encoding intact.
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII are
    /// treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Header lookup that keeps non-ASCII values, decoding them as UTF-8 with
    /// replacement characters where needed.
    pub fn header_lossy<K: AsHeaderName>(&self, name: K) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    /// Values are raw captures from the encoded path unless
    /// [`PathDecode`](crate::middleware::PathDecode) ran earlier in the chain.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> { &self.params }

    /// Mutable access to the captured path parameters, for middleware that
    /// rewrites them before the handler runs.
    pub fn params_mut(&mut self) -> &mut HashMap<String, String> { &mut self.params }

    pub fn scope(&self) -> &Scope { &self.scope }

    /// Replaces the request scope with a derived one.
    pub fn set_scope(&mut self, scope: Scope) { self.scope = scope; }

    /// Shortcut for `req.scope().correlation_id()`; `""` if none is attached.
    pub fn correlation_id(&self) -> &str { self.scope.correlation_id() }

    /// Shortcut for `req.scope().content_type()`; `""` if none is attached.
    pub fn content_type(&self) -> &str { self.scope.content_type() }
}
