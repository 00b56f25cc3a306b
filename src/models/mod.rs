//! Data model shared by import, export, templating and dispatch

pub mod environment;
pub mod history;
pub mod request;
pub mod response;
pub mod types;

pub use environment::{Environment, Variable};
pub use history::{HistoryEntry, HistoryResponse};
pub use request::Request;
pub use response::ResponseSummary;
pub use types::HeadersDict;
