//! Percent-decoding of captured path parameters.
//!
//! The router matches against the path exactly as it arrived, so `/files/a%2Fb`
//! hits `/files/{name}` with `name = "a%2Fb"` instead of failing to match.
//! [`PathDecode`] then turns the captures into the values handlers expect.

use std::fmt;

use tracing::debug;

use crate::handler::BoxFuture;
use crate::middleware::{Abort, Middleware, Next, Outcome};
use crate::request::Request;

/// Why a path segment could not be decoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A `%` not followed by two hex digits. Holds the offending escape.
    InvalidEscape(String),
    /// The decoded bytes are not UTF-8.
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscape(escape) => write!(f, "invalid URL escape {escape:?}"),
            Self::InvalidUtf8 => f.write_str("decoded value is not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Percent-decodes a single path segment.
///
/// Strict: every `%` must start a two-hex-digit escape. `+` stays `+`; it
/// only means space in query strings.
///
/// ```rust
/// use cairn::middleware::decode_path_segment;
///
/// assert_eq!(decode_path_segment("a%20b").unwrap(), "a b");
/// assert!(decode_path_segment("a%zz").is_err());
/// ```
pub fn decode_path_segment(raw: &str) -> Result<String, DecodeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|&b| b == b'%') {
        let start = i + offset;
        let escape = bytes.get(start + 1..start + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            let end = (start + 3).min(bytes.len());
            let escape = String::from_utf8_lossy(&bytes[start..end]).into_owned();
            return Err(DecodeError::InvalidEscape(escape));
        }
        i = start + 3;
    }

    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8)
}

/// Decodes every captured path parameter in place before the handler runs.
///
/// The first parameter that fails to decode stops the chain: a debug event
/// names the parameter and its raw value, and the client receives
/// `400 Bad Request`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathDecode;

impl Middleware for PathDecode {
    fn call(&self, mut req: Request, next: Next) -> BoxFuture<Outcome> {
        Box::pin(async move {
            for (name, value) in req.params_mut().iter_mut() {
                match decode_path_segment(value) {
                    Ok(decoded) => *value = decoded,
                    Err(error) => {
                        debug!(param = %name, value = %value, %error, "failed to decode path parameter");
                        return Err(Abort::MalformedParam {
                            name: name.clone(),
                            value: value.clone(),
                            error,
                        });
                    }
                }
            }
            Ok(next.run(req).await)
        })
    }
}
