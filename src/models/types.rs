//! Core type aliases
//!
//! # Why IndexMap?
//!
//! We use [`IndexMap`] for header dictionaries to preserve insertion order.
//! HTTP semantics don't require it, but users expect the order they typed to
//! survive import, export and history.

use indexmap::IndexMap;

/// Headers dictionary - header name to a single value.
///
/// Keys are case-sensitive as typed; a repeated key overwrites the earlier
/// value in place (last write wins, first position kept).
pub type HeadersDict = IndexMap<String, String>;

/// Check whether a header name is present, ignoring case
pub fn has_header(headers: &HeadersDict, name: &str) -> bool {
    headers.keys().any(|k| k.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_header_ignores_case() {
        let mut headers = HeadersDict::new();
        headers.insert("Content-Type".to_string(), "text/plain".to_string());

        assert!(has_header(&headers, "CONTENT-TYPE"));
        assert!(!has_header(&headers, "Accept"));
    }

    #[test]
    fn test_last_write_keeps_position() {
        let mut headers = HeadersDict::new();
        headers.insert("A".to_string(), "1".to_string());
        headers.insert("B".to_string(), "2".to_string());
        headers.insert("A".to_string(), "3".to_string());

        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs[0], (&"A".to_string(), &"3".to_string()));
        assert_eq!(pairs.len(), 2);
    }
}
