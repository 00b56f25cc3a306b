//! HTTP client functionality
//!
//! [`Transport`] is the capability dispatch sends through;
//! [`ReqwestTransport`] is the production implementation.

pub mod http;
pub mod transport;

// Re-exports
pub use http::{ReqwestTransport, USER_AGENT_STRING};
pub use transport::{HttpDescriptor, NetworkErrorKind, Transport, TransportError, TransportResponse};
