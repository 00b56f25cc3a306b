//! Curl command generation
//!
//! Renders a request as a multi-line curl command for sharing ("copy as
//! cURL"). Every interpolated value is single-quoted, so the output is safe to
//! paste into a POSIX shell.

use crate::client::HttpDescriptor;
use crate::http::Method;
use crate::models::{HeadersDict, Request};

/// What a value needs to expose to be rendered as a curl command.
///
/// Implemented by the stored [`Request`] and by the dispatch descriptor, so a
/// resolved request can be exported exactly as it was sent.
pub trait CurlSource {
    fn url(&self) -> &str;
    fn method(&self) -> Method;
    fn headers(&self) -> &HeadersDict;
    /// Body text, `None` when there is none
    fn body(&self) -> Option<&str>;
}

impl CurlSource for Request {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> Method {
        self.method
    }

    fn headers(&self) -> &HeadersDict {
        &self.headers
    }

    fn body(&self) -> Option<&str> {
        Some(self.body.as_str()).filter(|b| !b.is_empty())
    }
}

impl CurlSource for HttpDescriptor {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> Method {
        self.method
    }

    fn headers(&self) -> &HeadersDict {
        &self.headers
    }

    fn body(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

const CONTINUATION: &str = " \\\n  ";

/// Generate a curl command.
///
/// Headers with an empty name or value are left out; the body is only
/// emitted for POST, PUT and PATCH.
pub fn generate_curl_command<S: CurlSource + ?Sized>(source: &S) -> String {
    let method = source.method();
    let mut parts = vec![format!("curl -X {} {}", method, shell_quote(source.url()))];

    for (name, value) in source.headers() {
        if name.is_empty() || value.is_empty() {
            continue;
        }
        parts.push(format!("-H {}", shell_quote(&format!("{}: {}", name, value))));
    }

    if method.exports_body() {
        if let Some(body) = source.body().filter(|b| !b.is_empty()) {
            parts.push(format!("-d {}", shell_quote(body)));
        }
    }

    parts.join(CONTINUATION)
}

/// Wrap a value in single quotes, embedding literal quotes as `'\''`
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
