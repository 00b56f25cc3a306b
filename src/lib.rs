//! curlkit library interface
//!
//! Converts cURL command lines into stored HTTP requests and back, resolves
//! `{{variable}}` placeholders against environments, and dispatches requests.
//!
//! # Module Organization
//!
//! - [`curl`] - Tokenizer, flag interpreter, request builder and serializer
//! - [`template`] - Placeholder substitution
//! - [`dispatch`] - Request pipeline (defaults, substitution, validation, send, history)
//! - [`client`] - Transport trait and the reqwest implementation
//! - [`history`] - History stores
//! - [`models`] - Request, Environment, ResponseSummary, HistoryEntry
//! - [`config`] - Settings from config.toml
//! - [`errors`] - Error types (CurlkitError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - CLI execution logic

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod curl;
pub mod dispatch;
pub mod errors;
pub mod history;
pub mod http;
pub mod models;
pub mod status;
pub mod template;
