//! HTTP protocol types and constants
//!
//! Provides the method enumeration and the header policy shared by import,
//! export and dispatch.

mod method;

pub use method::*;

/// Headers a client-side request may not set.
///
/// The transport computes these itself; forwarding user-supplied values makes
/// the request fail at the connection level.
pub const UNSAFE_HEADERS: &[&str] = &[
    "host",
    "connection",
    "content-length",
    "keep-alive",
    "transfer-encoding",
    "upgrade",
    "te",
    "trailer",
    "expect",
    "proxy-connection",
];

/// Check if a header name is on the unsafe list (case-insensitive)
pub fn is_unsafe_header(name: &str) -> bool {
    let name = name.trim();
    UNSAFE_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}
