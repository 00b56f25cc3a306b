//! `{{variable}}` substitution against the active environment
//!
//! Placeholders are resolved into a copy of the request right before dispatch;
//! the stored request keeps its placeholders. A placeholder with no usable
//! value (no active environment, unknown variable, or empty value) is left
//! verbatim and reported as unresolved.
//!
//! ```
//! use curlkit::models::Environment;
//! use curlkit::template::resolve;
//!
//! let env = Environment::new("dev").with_variable("host", "api.x.com");
//! assert_eq!(resolve("https://{{host}}/{{path}}", Some(&env)), "https://api.x.com/{{path}}");
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{Environment, Request};

/// Non-greedy so adjacent placeholders are matched independently
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.+?)\}\}").expect("Invalid placeholder regex"));

/// Outcome of substituting one piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    /// Variable names that were replaced, in order of appearance
    pub resolved: Vec<String>,
    /// Variable names left in place, in order of appearance
    pub unresolved: Vec<String>,
}

/// Substitute placeholders in `text`, reporting which names resolved
pub fn substitute(text: &str, env: Option<&Environment>) -> Substitution {
    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();

    let replaced = PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| {
        let name = caps[1].trim();
        match env.and_then(|e| e.value(name)) {
            Some(value) => {
                resolved.push(name.to_string());
                value.to_string()
            }
            None => {
                unresolved.push(name.to_string());
                caps[0].to_string()
            }
        }
    });

    Substitution {
        text: replaced.into_owned(),
        resolved,
        unresolved,
    }
}

/// Substitute placeholders and return only the new text
pub fn resolve(text: &str, env: Option<&Environment>) -> String {
    if !has_variables(text) {
        return text.to_string();
    }
    substitute(text, env).text
}

/// Names of placeholders in `text` that would stay unresolved
pub fn unresolved_variables(text: &str, env: Option<&Environment>) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| env.and_then(|e| e.value(name)).is_none())
        .collect()
}

/// Check if a string contains `{{variable}}` syntax
pub fn has_variables(s: &str) -> bool {
    PLACEHOLDER_RE.is_match(s)
}

/// Copy of `request` with url, header values and body resolved.
///
/// Header names are never substituted.
pub fn resolve_request(request: &Request, env: Option<&Environment>) -> Request {
    let mut resolved = request.clone();
    resolved.url = resolve(&request.url, env);
    for value in resolved.headers.values_mut() {
        *value = resolve(value, env);
    }
    resolved.body = resolve(&request.body, env);
    resolved
}

/// Unresolved placeholder names across url, header values and body.
///
/// Deduplicated, in order of first appearance.
pub fn unresolved_in_request(request: &Request, env: Option<&Environment>) -> Vec<String> {
    let texts = std::iter::once(request.url.as_str())
        .chain(request.headers.values().map(String::as_str))
        .chain(std::iter::once(request.body.as_str()));

    let mut names: Vec<String> = Vec::new();
    for text in texts {
        for name in unresolved_variables(text, env) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    fn env() -> Environment {
        Environment::new("test")
            .with_variable("host", "api.x.com")
            .with_variable("path", "v1")
    }

    #[test]
    fn test_resolve_all() {
        assert_eq!(resolve("https://{{host}}/{{path}}", Some(&env())), "https://api.x.com/v1");
    }

    #[test]
    fn test_missing_variable_left_verbatim() {
        let env = Environment::new("test").with_variable("host", "api.x.com");
        assert_eq!(resolve("https://{{host}}/{{path}}", Some(&env)), "https://api.x.com/{{path}}");
    }

    #[test]
    fn test_no_environment() {
        assert_eq!(resolve("https://{{host}}/", None), "https://{{host}}/");
        assert_eq!(unresolved_variables("https://{{host}}/", None), vec!["host"]);
    }

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(resolve("{{ host }}", Some(&env())), "api.x.com");
    }

    #[test]
    fn test_empty_value_not_substituted() {
        let env = Environment::new("test").with_variable("token", "");
        let result = substitute("Bearer {{token}}", Some(&env));
        assert_eq!(result.text, "Bearer {{token}}");
        assert_eq!(result.unresolved, vec!["token"]);
    }

    #[test]
    fn test_adjacent_placeholders() {
        assert_eq!(resolve("{{host}}{{path}}", Some(&env())), "api.x.comv1");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let env = Environment::new("test").with_variable("a", "{{b}}").with_variable("b", "x");
        assert_eq!(resolve("{{a}}", Some(&env)), "{{b}}");
    }

    #[test]
    fn test_substitution_reports_names() {
        let result = substitute("{{host}}/{{missing}}/{{path}}", Some(&env()));
        assert_eq!(result.resolved, vec!["host", "path"]);
        assert_eq!(result.unresolved, vec!["missing"]);
    }

    #[test]
    fn test_text_without_placeholders() {
        let result = substitute("plain {text} }}{{", Some(&env()));
        assert_eq!(result.text, "plain {text} }}{{");
        assert!(result.resolved.is_empty());
        assert!(result.unresolved.is_empty());
        assert!(!has_variables("plain {text}"));
        assert!(has_variables("{{x}}"));
        assert_eq!(resolve("plain {text} }}{{", Some(&env())), "plain {text} }}{{");
        assert_eq!(resolve("{ {host} }", None), "{ {host} }");
    }

    #[test]
    fn test_resolve_request_leaves_original_untouched() {
        let request = Request::new(Method::Post, "https://{{host}}/{{path}}")
            .with_header("{{host}}", "Bearer {{token}}")
            .with_header("X-Path", "{{path}}")
            .with_body(r#"{"host":"{{host}}"}"#);

        let resolved = resolve_request(&request, Some(&env()));
        assert_eq!(resolved.url, "https://api.x.com/v1");
        assert_eq!(resolved.headers["{{host}}"], "Bearer {{token}}");
        assert_eq!(resolved.headers["X-Path"], "v1");
        assert_eq!(resolved.body, r#"{"host":"api.x.com"}"#);

        assert_eq!(request.url, "https://{{host}}/{{path}}");
        assert_eq!(resolved.id(), request.id());
    }

    #[test]
    fn test_unresolved_in_request_dedups() {
        let request = Request::new(Method::Post, "https://{{host}}/{{missing}}")
            .with_header("Authorization", "Bearer {{token}}")
            .with_body("{{missing}} {{token}} {{path}}");

        assert_eq!(unresolved_in_request(&request, Some(&env())), vec!["missing", "token"]);
        assert_eq!(
            unresolved_in_request(&request, None),
            vec!["host", "missing", "token", "path"]
        );
    }
}
