//! HTTP transport backed by reqwest

use reqwest::Client;
use std::error::Error as StdError;
use std::io;
use tracing::debug;

use crate::client::transport::{
    HttpDescriptor, NetworkErrorKind, Transport, TransportError, TransportResponse,
};
use crate::models::HeadersDict;

pub const USER_AGENT_STRING: &str = concat!("curlkit/", env!("CARGO_PKG_VERSION"));

/// Sends descriptors with a reqwest client built from the descriptor's
/// timeout, redirect and TLS options
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, descriptor: &HttpDescriptor) -> Result<TransportResponse, TransportError> {
        let client = build_client(descriptor)?;

        let mut request = client.request(descriptor.method.into(), descriptor.url.as_str());
        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(ref data) = descriptor.data {
            request = request.body(data.clone());
        }

        debug!(method = %descriptor.method, url = %descriptor.url, "sending request");
        let response = request.send().await.map_err(|e| classify_error(&e))?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let received = TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            data: Vec::new(),
        };

        match response.bytes().await {
            Ok(bytes) => Ok(TransportResponse {
                data: bytes.to_vec(),
                ..received
            }),
            Err(e) => {
                let mut err = classify_error(&e);
                err.response = Some(received);
                Err(err)
            }
        }
    }
}

fn build_client(descriptor: &HttpDescriptor) -> Result<Client, TransportError> {
    let mut builder = Client::builder().user_agent(USER_AGENT_STRING);

    if let Some(timeout) = descriptor.timeout {
        builder = builder.timeout(timeout);
    }

    if descriptor.follow_redirects {
        builder = builder.redirect(reqwest::redirect::Policy::limited(descriptor.max_redirects as usize));
    } else {
        builder = builder.redirect(reqwest::redirect::Policy::none());
    }

    if !descriptor.verify_ssl {
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| TransportError::new(NetworkErrorKind::Network, e.to_string()))
}

/// Repeated headers are folded into one comma-separated value
fn collect_headers(headers: &reqwest::header::HeaderMap) -> HeadersDict {
    let mut collected = HeadersDict::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

/// Map a reqwest error onto the fixed failure taxonomy
fn classify_error(err: &reqwest::Error) -> TransportError {
    let detail = error_chain(err);

    let kind = if err.is_timeout() || has_io_kind(err, io::ErrorKind::TimedOut) {
        NetworkErrorKind::Timeout
    } else if has_io_kind(err, io::ErrorKind::ConnectionRefused) {
        NetworkErrorKind::ConnectionRefused
    } else {
        NetworkErrorKind::from_message(&detail).unwrap_or(NetworkErrorKind::Network)
    };

    debug!(?kind, error = %detail, "request failed");
    TransportError::new(kind, detail)
}

/// The error and all of its sources, joined with ": "
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

fn has_io_kind(err: &(dyn StdError + 'static), kind: io::ErrorKind) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == kind {
                return true;
            }
        }
        source = cause.source();
    }
    false
}
