//! Audit trail of dispatch attempts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::request::{new_id, Request};
use crate::models::response::ResponseSummary;
use crate::models::types::HeadersDict;

/// One dispatch attempt, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Snapshot of the stored request, placeholders intact
    pub request: Request,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<HistoryResponse>,
}

/// Response portion of a history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: HeadersDict,
    #[serde(default)]
    pub data: JsonValue,
    /// Milliseconds
    pub time: u64,
}

impl HistoryEntry {
    pub fn new(request: Request, response: Option<HistoryResponse>) -> Self {
        Self {
            id: new_id(),
            request,
            timestamp: Utc::now(),
            response,
        }
    }
}

impl From<&ResponseSummary> for HistoryResponse {
    fn from(summary: &ResponseSummary) -> Self {
        Self {
            status: summary.status_code,
            status_text: summary.status.clone(),
            headers: summary.headers.clone(),
            data: summary.body.clone(),
            time: summary.response_time,
        }
    }
}
