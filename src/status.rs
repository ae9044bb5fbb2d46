//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use cairn::{Response, Status};
//!
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/users/42")
//!     .json(br#"{"id":42}"#.to_vec());
//!
//! async fn delete_user(_req: cairn::Request) -> Status {
//!     Status::NoContent
//! }
//! ```
//!
//! Only the codes a JSON API behind a proxy actually sends are listed. The
//! discriminant is the wire code.

/// An HTTP status code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u16)]
pub enum Status {
    // ── 2xx ───────────────────────────────────────────────────────────────────
    Ok = 200,
    Created = 201,
    Accepted = 202,
    NoContent = 204,

    // ── 3xx ───────────────────────────────────────────────────────────────────
    MovedPermanently = 301,
    Found = 302,
    SeeOther = 303,
    NotModified = 304,
    TemporaryRedirect = 307,
    PermanentRedirect = 308,

    // ── 4xx ───────────────────────────────────────────────────────────────────
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    NotAcceptable = 406,
    Conflict = 409,
    Gone = 410,
    PreconditionFailed = 412,
    ContentTooLarge = 413,
    UnsupportedMediaType = 415,
    UnprocessableContent = 422,
    TooManyRequests = 429,

    // ── 5xx ───────────────────────────────────────────────────────────────────
    InternalServerError = 500,
    NotImplemented = 501,
    BadGateway = 502,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s as u16
    }
}
