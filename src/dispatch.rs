//! Request dispatch
//!
//! A linear pipeline with no retries:
//!
//! 1. merge settings defaults under the request's own values
//! 2. substitute `{{variables}}` from the active environment
//! 3. validate the URL
//! 4. strip headers a client may not set
//! 5. send through the [`Transport`]
//! 6. record a [`HistoryEntry`], whatever the outcome
//!
//! Every failure comes back as a [`ResponseSummary`] with `status_code == 0`;
//! callers never handle an error for the common failure paths.

use serde_json::Value as JsonValue;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::client::{HttpDescriptor, Transport, TransportResponse};
use crate::config::Settings;
use crate::history::HistoryStore;
use crate::http;
use crate::models::types::has_header;
use crate::models::{Environment, HeadersDict, HistoryEntry, HistoryResponse, Request, ResponseSummary};
use crate::template;

/// Problems found before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid request: URL is required")]
    MissingUrl,

    #[error("Invalid request: '{url}' is not a valid URL ({reason})")]
    InvalidUrl { url: String, reason: String },
}

/// Runs requests through a transport and records every attempt
#[derive(Debug)]
pub struct Dispatcher<T, H> {
    transport: T,
    history: H,
}

impl<T: Transport, H: HistoryStore> Dispatcher<T, H> {
    pub fn new(transport: T, history: H) -> Self {
        Self { transport, history }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Dispatch `request` with `settings` defaults, resolving placeholders
    /// against `env`.
    ///
    /// The stored request is not modified; history receives it with its
    /// placeholders intact.
    pub async fn dispatch(
        &self,
        request: &Request,
        settings: &Settings,
        env: Option<&Environment>,
    ) -> ResponseSummary {
        let summary = match prepare(request, settings, env) {
            Ok(descriptor) => self.send(&descriptor).await,
            Err(e) => {
                warn!(request = request.id(), "{}", e);
                ResponseSummary::failure(e.to_string(), 0)
            }
        };

        self.record(request, &summary);
        summary
    }

    async fn send(&self, descriptor: &HttpDescriptor) -> ResponseSummary {
        let started = Instant::now();
        let result = self.transport.send(descriptor).await;
        let elapsed = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                info!(
                    method = %descriptor.method,
                    url = %descriptor.url,
                    status = response.status,
                    elapsed_ms = elapsed,
                    "response received"
                );
                summarize(response, elapsed)
            }
            Err(err) => {
                warn!(method = %descriptor.method, url = %descriptor.url, error = %err, "request failed");
                match err.response {
                    Some(ref response) if response.status > 0 => summarize(response.clone(), elapsed),
                    _ => ResponseSummary::failure(err.user_message(), elapsed),
                }
            }
        }
    }

    fn record(&self, request: &Request, summary: &ResponseSummary) {
        let entry = HistoryEntry::new(request.clone(), Some(HistoryResponse::from(summary)));
        if let Err(e) = self.history.record(entry) {
            warn!(error = %e, "failed to record history entry");
        }
    }
}

/// Build the descriptor a transport receives.
///
/// Pure: no I/O, the stored request is untouched.
pub fn prepare(
    request: &Request,
    settings: &Settings,
    env: Option<&Environment>,
) -> Result<HttpDescriptor, ValidationError> {
    let merged = merge_defaults(request, settings);

    let unresolved = template::unresolved_in_request(&merged, env);
    if !unresolved.is_empty() {
        warn!(variables = ?unresolved, "sending with unresolved variables");
    }
    let mut resolved = template::resolve_request(&merged, env);

    validate(&resolved)?;
    let url = normalize_url(&resolved.url)?;

    let stripped = strip_unsafe_headers(&mut resolved.headers);
    if !stripped.is_empty() {
        debug!(headers = ?stripped, "removed headers the client may not set");
    }

    let data = (resolved.method.sends_body() && resolved.has_body()).then_some(resolved.body);

    Ok(HttpDescriptor {
        url,
        method: resolved.method,
        headers: resolved.headers,
        data,
        timeout: settings.timeout_duration(),
        follow_redirects: settings.follow_redirects,
        max_redirects: settings.max_redirects,
        verify_ssl: settings.ssl_verification,
    })
}

/// Check a request before dispatch
pub fn validate(request: &Request) -> Result<(), ValidationError> {
    if request.url.trim().is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    Ok(())
}

/// Default headers go under the request's own; an explicit header wins
/// regardless of case
fn merge_defaults(request: &Request, settings: &Settings) -> Request {
    let mut merged = request.clone();
    for (name, value) in &settings.default_headers {
        if !has_header(&merged.headers, name) {
            merged.headers.insert(name.clone(), value.clone());
        }
    }
    merged
}

/// Remove unsafe headers, returning the names removed
fn strip_unsafe_headers(headers: &mut HeadersDict) -> Vec<String> {
    let mut stripped = Vec::new();
    headers.retain(|name, _| {
        let unsafe_header = http::is_unsafe_header(name);
        if unsafe_header {
            stripped.push(name.clone());
        }
        !unsafe_header
    });
    stripped
}

/// Trim, default the scheme to http and check the URL parses
fn normalize_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let url = if has_url_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    Url::parse(&url).map_err(|e| ValidationError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    Ok(url)
}

/// Per RFC 3986: scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn has_url_scheme(s: &str) -> bool {
    match s.find("://") {
        Some(pos) => {
            let scheme = &s[..pos];
            scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn summarize(response: TransportResponse, elapsed: u64) -> ResponseSummary {
    let status = format!("{} {}", response.status, response.status_text)
        .trim()
        .to_string();

    ResponseSummary {
        status,
        status_code: response.status,
        headers: response.headers,
        body: body_value(&response.data),
        response_time: elapsed,
    }
}

/// JSON bodies are parsed, anything else is kept as text
fn body_value(data: &[u8]) -> JsonValue {
    if data.is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_slice(data)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(data).into_owned()))
}
