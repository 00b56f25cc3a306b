//! Transport capability used by dispatch
//!
//! Dispatch only depends on [`Transport`]; the reqwest implementation lives in
//! [`crate::client::http`] and tests substitute their own.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::http::Method;
use crate::models::HeadersDict;

/// Fully resolved request handed to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpDescriptor {
    pub url: String,
    pub method: Method,
    pub headers: HeadersDict,
    /// Body to transmit; always `None` for GET, HEAD and OPTIONS
    pub data: Option<String>,
    pub timeout: Option<Duration>,
    pub follow_redirects: bool,
    pub max_redirects: u32,
    pub verify_ssl: bool,
}

/// Raw response returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HeadersDict,
    pub data: Vec<u8>,
}

/// Fixed taxonomy of network failures shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    ConnectionRefused,
    HostNotFound,
    Timeout,
    Network,
}

impl NetworkErrorKind {
    /// Human-readable message for this failure
    pub fn message(&self) -> &'static str {
        match self {
            NetworkErrorKind::ConnectionRefused => {
                "Connection refused: the server is not accepting connections"
            }
            NetworkErrorKind::HostNotFound => "Host not found: check the URL and your network connection",
            NetworkErrorKind::Timeout => "Request timed out",
            NetworkErrorKind::Network => "Network error",
        }
    }

    /// Classify a failure from its error text.
    ///
    /// Error messages are the only signal shared by every resolver and
    /// platform, so DNS failures are recognised by wording.
    pub fn from_message(text: &str) -> Option<Self> {
        let text = text.to_ascii_lowercase();

        if text.contains("connection refused") || text.contains("actively refused") {
            Some(NetworkErrorKind::ConnectionRefused)
        } else if text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("name or service not known")
            || text.contains("no such host")
            || text.contains("nodename nor servname")
            || text.contains("temporary failure in name resolution")
        {
            Some(NetworkErrorKind::HostNotFound)
        } else if text.contains("timed out") || text.contains("timeout") {
            Some(NetworkErrorKind::Timeout)
        } else {
            None
        }
    }
}

/// A failed send.
///
/// `response` is set when the transport gave up after receiving a response,
/// for example while reading the body.
#[derive(Debug, Clone, Error)]
#[error("{}: {detail}", .kind.message())]
pub struct TransportError {
    pub kind: NetworkErrorKind,
    pub detail: String,
    pub response: Option<TransportResponse>,
}

impl TransportError {
    pub fn new(kind: NetworkErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            response: None,
        }
    }

    /// Message for the response summary; generic failures carry their detail
    pub fn user_message(&self) -> String {
        match self.kind {
            NetworkErrorKind::Network if !self.detail.is_empty() => {
                format!("{}: {}", self.kind.message(), self.detail)
            }
            kind => kind.message().to_string(),
        }
    }
}

/// Something that can send an [`HttpDescriptor`].
///
/// This is the only place dispatch suspends.
pub trait Transport {
    fn send(
        &self,
        descriptor: &HttpDescriptor,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>>;
}
