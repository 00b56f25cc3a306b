//! Turns interpreted curl output into a stored [`Request`]

use tracing::warn;

use crate::curl::import::{parse_curl_command, ParsedCurl};
use crate::http::Method;
use crate::models::Request;

/// Name used when the URL has no path segment to borrow
pub const IMPORTED_NAME: &str = "Imported Request";

/// Description stamped on every imported request
pub const IMPORTED_DESCRIPTION: &str = "Imported from cURL";

/// Build a request from a parsed curl command.
///
/// No validation happens here; a missing URL becomes an empty `url` and is
/// rejected at dispatch time.
pub fn build(parsed: ParsedCurl) -> Request {
    let url = parsed.url.unwrap_or_default();

    let method = parsed.method.parse::<Method>().unwrap_or_else(|e| {
        warn!(method = %parsed.method, "{}, falling back to GET", e);
        Method::Get
    });

    let mut request = Request::new(method, url)
        .with_body(parsed.body.unwrap_or_default())
        .with_description(IMPORTED_DESCRIPTION);
    request.name = name_from_url(&request.url);
    request.headers = parsed.headers;
    request
}

/// Parse and build in one step; `None` when the input is not a curl command
pub fn import_curl(cmd: &str) -> Option<Request> {
    parse_curl_command(cmd).map(build)
}

/// Last non-empty path segment of a URL, or [`IMPORTED_NAME`].
///
/// Works on raw text so templated URLs such as `https://{{host}}/users` still
/// yield a name.
pub fn name_from_url(url: &str) -> String {
    let url = url.trim();
    let rest = match url.find("://") {
        Some(pos) => &url[pos + 3..],
        None => url,
    };
    let path = rest.split(['?', '#']).next().unwrap_or_default();

    path.split('/')
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
        .unwrap_or_else(|| IMPORTED_NAME.to_string())
}
