//! Minimal cairn service with the full middleware chain.
//!
//! Run with:
//!   RUST_LOG=trace cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/users/42
//!   curl -i -H 'x-correlation-id: abc-123' http://localhost:3000/users/jane%20doe
//!   curl -i http://localhost:3000/users/bad%zz        # 400
//!   curl -i -X POST http://localhost:3000/users \
//!        -H 'content-type: application/json' -d '{"name":"alice"}'
//!   curl -i http://localhost:3000/healthz

use cairn::middleware::{Correlate, PathDecode, TraceLog};
use cairn::{Request, Response, Router, Server, Status, health};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = Router::new()
        .layer(Correlate::new())
        .layer(TraceLog::forwarding())
        .layer(PathDecode)
        .get("/users/{id}",    get_user)
        .post("/users",        create_user)
        .delete("/users/{id}", delete_user)
        .get("/healthz",       health::liveness)
        .get("/readyz",        health::readiness);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /users/{id}, with `id` already decoded by PathDecode. Plain text: both
// values come from the caller and are not JSON-escaped.
async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::text(format!("user {id} (correlation {})", req.correlation_id()))
}

// POST /users
async fn create_user(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(Status::BadRequest);
    }
    if req.content_type() != "application/json" {
        return Response::status(Status::UnsupportedMediaType);
    }

    Response::builder()
        .status(Status::Created)
        .header("location", "/users/99")
        .json(br#"{"id":"99","name":"new_user"}"#.to_vec())
}

// DELETE /users/{id} → 204
async fn delete_user(_req: Request) -> Status {
    Status::NoContent
}
