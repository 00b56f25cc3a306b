//! cURL command interchange
//!
//! Converts between curl command lines and stored [`Request`](crate::models::Request)s:
//!
//! - [`tokenize`] splits a command into shell words
//! - [`interpret`] reads the words into a [`ParsedCurl`]
//! - [`build`] turns a [`ParsedCurl`] into a request
//! - [`generate_curl_command`] renders a request back into a command
//!
//! ```
//! use curlkit::curl::{generate_curl_command, import_curl};
//!
//! let request = import_curl("curl -H 'Accept: text/plain' https://example.com/notes").unwrap();
//! assert_eq!(request.name, "notes");
//!
//! let cmd = generate_curl_command(&request);
//! assert!(cmd.starts_with("curl -X GET 'https://example.com/notes'"));
//! ```

pub mod builder;
pub mod export;
pub mod import;
pub mod tokenize;

pub use builder::{build, import_curl, name_from_url, IMPORTED_DESCRIPTION, IMPORTED_NAME};
pub use export::{generate_curl_command, shell_quote, CurlSource};
pub use import::{interpret, parse_curl_command, ParsedCurl};
pub use tokenize::tokenize;
