//! Normalized outcome of a dispatch

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::types::HeadersDict;

/// The single success/failure shape handed back by dispatch.
///
/// Network failures are represented with `status_code == 0` and a
/// human-readable `status`; non-2xx responses are ordinary summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub status: String,
    pub status_code: u16,
    #[serde(default)]
    pub headers: HeadersDict,
    #[serde(default)]
    pub body: JsonValue,
    /// Milliseconds spent in the transport call
    pub response_time: u64,
}

impl ResponseSummary {
    /// Synthesize a summary for a request that never produced a response
    pub fn failure(message: impl Into<String>, response_time: u64) -> Self {
        Self {
            status: message.into(),
            status_code: 0,
            headers: HeadersDict::new(),
            body: JsonValue::Null,
            response_time,
        }
    }

    /// True when no response was received
    pub fn is_failure(&self) -> bool {
        self.status_code == 0
    }

    /// True for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Body rendered for display; JSON is pretty-printed, text is returned as-is
    pub fn body_text(&self) -> String {
        match &self.body {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        }
    }
}
