//! Per-request scope.
//!
//! Every request carries a [`Scope`]: the values middleware attaches for the
//! benefit of everything downstream. It is a plain struct, not a string-keyed
//! bag, so a handler reads `req.scope().correlation_id()` instead of looking
//! up a magic key.
//!
//! Scopes are layered, never mutated in place. A middleware that adds a value
//! derives a new scope from the current one and swaps it onto the request:
//!
//! ```rust
//! use cairn::Scope;
//!
//! let base = Scope::default();
//! let derived = base.clone().with_correlation_id("req-1");
//!
//! assert_eq!(base.correlation_id(), "");
//! assert_eq!(derived.correlation_id(), "req-1");
//! ```

/// Values scoped to a single inbound request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Scope {
    correlation_id: Option<String>,
    content_type: Option<String>,
    trace_enabled: bool,
}

impl Scope {
    /// The scope the router attaches when a request enters the chain.
    ///
    /// Whether trace logging is on is decided here, once, so every layer of
    /// the chain sees the same answer for the whole request.
    pub(crate) fn entry(trace_enabled: bool) -> Self {
        Self { trace_enabled, ..Self::default() }
    }

    /// Derives a scope carrying `id` as the correlation identifier.
    pub fn with_correlation_id(self, id: impl Into<String>) -> Self {
        Self { correlation_id: Some(id.into()), ..self }
    }

    /// Derives a scope carrying `content_type`. An empty value is kept as-is.
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        Self { content_type: Some(content_type.into()), ..self }
    }

    /// Derives a scope with trace logging switched on or off.
    pub fn with_trace_enabled(self, trace_enabled: bool) -> Self {
        Self { trace_enabled, ..self }
    }

    /// The correlation identifier, or `""` if none was attached.
    pub fn correlation_id(&self) -> &str {
        self.correlation_id.as_deref().unwrap_or_default()
    }

    /// The inbound content type, or `""` if none was attached.
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or_default()
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace_enabled
    }
}
