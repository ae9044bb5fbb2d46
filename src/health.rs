//! Built-in Kubernetes health-check handlers.
//!
//! | Probe | Path | Failure means |
//! |---|---|---|
//! | **Liveness** | `/healthz` | restart the pod |
//! | **Readiness** | `/readyz` | pull the pod from the load balancer |
//!
//! ```rust,no_run
//! use cairn::{Router, health};
//!
//! let app = Router::new()
//!     .get("/healthz", health::liveness)
//!     .get("/readyz", health::readiness);
//! ```
//!
//! Register probes on a router without [`TraceLog`](crate::middleware::TraceLog)
//! in the default skipping mode, or they answer `204` whenever trace logging
//! is off.

use crate::{Request, Response};

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`. Replace it with your own handler to gate on
/// dependency health.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
