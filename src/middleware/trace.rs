//! Trace-level request logging.

use std::time::Instant;

use tracing::{Level, trace};

use crate::handler::BoxFuture;
use crate::middleware::{Abort, Middleware, Next, Outcome};
use crate::request::Request;

/// Whether the active subscriber records trace events from this module.
///
/// The router asks once per request and stores the answer in the
/// [`Scope`](crate::Scope); nothing downstream re-checks the log level.
pub(crate) fn trace_enabled() -> bool {
    tracing::enabled!(Level::TRACE)
}

/// Emits a `begin request` and a `response complete` trace event around the
/// rest of the chain, both tagged with the scope's correlation id.
///
/// When trace logging is off for the request, `TraceLog::new()` does not run
/// the rest of the chain at all: it returns [`Abort::Skipped`], which is sent
/// as an empty `204 No Content`. Use [`TraceLog::forwarding`] to pass the
/// request through untouched instead.
#[derive(Clone, Copy, Debug)]
pub struct TraceLog {
    skip_when_disabled: bool,
}

impl TraceLog {
    pub fn new() -> Self {
        Self { skip_when_disabled: true }
    }

    /// A `TraceLog` that forwards without logging when trace is off.
    pub fn forwarding() -> Self {
        Self { skip_when_disabled: false }
    }
}

impl Default for TraceLog {
    fn default() -> Self { Self::new() }
}

impl Middleware for TraceLog {
    fn call(&self, req: Request, next: Next) -> BoxFuture<Outcome> {
        let skip_when_disabled = self.skip_when_disabled;

        Box::pin(async move {
            if !req.scope().trace_enabled() {
                if skip_when_disabled {
                    return Err(Abort::Skipped);
                }
                return Ok(next.run(req).await);
            }

            let begin = Instant::now();
            let correlation_id = req.correlation_id().to_owned();
            trace!(correlation_id = %correlation_id, path = %req.path(), "begin request");

            let res = next.run(req).await;

            trace!(correlation_id = %correlation_id, duration = ?begin.elapsed(), "response complete");
            Ok(res)
        })
    }
}
