//! The canonical request entity

use serde::{Deserialize, Serialize};

use crate::http::Method;
use crate::models::types::HeadersDict;

/// A stored HTTP request.
///
/// The url, header values and body may hold `{{variable}}` placeholders; they
/// are resolved into a copy at dispatch time and never written back, so the
/// stored request stays environment-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default = "new_id")]
    id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub headers: HeadersDict,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub description: String,
}

/// Generate a fresh opaque request identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Request {
    /// Create a request with a fresh id and no headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: String::new(),
            url: url.into(),
            method,
            headers: HeadersDict::new(),
            body: String::new(),
            description: String::new(),
        }
    }

    /// The identifier assigned at creation
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// True when the body field holds text
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Parse a request from its persisted JSON record
    pub fn from_json(content: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Render the persisted JSON record
    pub fn to_json(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
