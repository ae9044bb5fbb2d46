//! # cairn
//!
//! A minimal HTTP framework for services behind a reverse proxy, built around
//! a small middleware chain that keeps every request traceable.
//!
//! - Radix-tree routing via [`matchit`], matched against the raw, still
//!   percent-encoded path
//! - Async I/O on tokio + hyper, HTTP/1.1 and HTTP/2
//! - Graceful shutdown on SIGTERM / Ctrl-C
//! - Built-in [`middleware`]: correlation ids, trace logging, path decoding
//!
//! TLS, rate limiting and body limits belong to the proxy and are not here.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use cairn::middleware::{Correlate, PathDecode, TraceLog};
//! use cairn::{Request, Response, Router, Server, Status};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .layer(Correlate::new())
//!         .layer(TraceLog::forwarding())
//!         .layer(PathDecode)
//!         .get("/users/{id}", get_user)
//!         .post("/users", create_user);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::text(format!("user {id} (correlation {})", req.correlation_id()))
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(Status::BadRequest);
//!     }
//!     Response::builder()
//!         .status(Status::Created)
//!         .header("location", "/users/99")
//!         .json(br#"{"id":"99"}"#.to_vec())
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod scope;
mod server;
mod status;

#[cfg(test)]
mod testing;

pub mod health;
pub mod middleware;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use scope::Scope;
pub use server::Server;
pub use status::Status;
