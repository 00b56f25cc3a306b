//! cURL command interpretation
//!
//! Walks the tokens of a curl command and collects the parts that describe
//! the HTTP request: method, headers, body and URL. Unknown options are
//! skipped so commands copied from browsers or docs still import.
//!
//! # Example
//!
//! ```
//! use curlkit::curl::parse_curl_command;
//!
//! let parsed = parse_curl_command("curl -d 'name=John' https://api.example.com/users").unwrap();
//! assert_eq!(parsed.method, "POST");
//! assert_eq!(parsed.body.as_deref(), Some("name=John"));
//! ```

use base64::Engine;
use tracing::debug;

use crate::curl::tokenize::tokenize;
use crate::http;
use crate::models::HeadersDict;

/// Result of interpreting a curl command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCurl {
    /// `None` when the command names no URL; callers treat that as a
    /// validation error, not a parse failure
    pub url: Option<String>,
    /// Upper-cased method text
    pub method: String,
    pub headers: HeadersDict,
    /// Data fragments joined with `&`
    pub body: Option<String>,
}

/// Options accumulated by the token scan, before method inference
#[derive(Debug, Default)]
struct CurlFlags {
    /// `Some` only when the command sets the method itself (`-X`, `-I`)
    method: Option<String>,
    headers: HeadersDict,
    data: Vec<String>,
    url: Option<String>,
}

/// Options the interpreter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Method,
    Header,
    Data,
    DataUrlencode,
    Head,
    UserAgent,
    Cookie,
    Referer,
    User,
    Url,
    /// Known option whose argument is consumed and discarded
    Skip,
}

impl Flag {
    fn lookup(name: &str) -> Option<Flag> {
        let flag = match name {
            "-X" | "--request" => Flag::Method,
            "-H" | "--header" => Flag::Header,
            "-d" | "--data" | "--data-raw" | "--data-binary" => Flag::Data,
            "--data-urlencode" => Flag::DataUrlencode,
            "-I" | "--head" => Flag::Head,
            "-A" | "--user-agent" => Flag::UserAgent,
            "-b" | "--cookie" => Flag::Cookie,
            "-e" | "--referer" => Flag::Referer,
            "-u" | "--user" => Flag::User,
            "--url" => Flag::Url,
            "-o" | "--output" | "-m" | "--max-time" | "--connect-timeout" | "-x" | "--proxy"
            | "-w" | "--write-out" | "--cacert" | "--cert" | "-E" | "--key" | "--max-redirs"
            | "-F" | "--form" | "-T" | "--upload-file" | "-c" | "--cookie-jar" | "-r"
            | "--range" | "--resolve" => Flag::Skip,
            _ => return None,
        };
        Some(flag)
    }

    fn takes_argument(self) -> bool {
        !matches!(self, Flag::Head)
    }
}

/// Parse a curl command string.
///
/// Returns `None` when the input is not a curl command.
pub fn parse_curl_command(cmd: &str) -> Option<ParsedCurl> {
    interpret(&tokenize(cmd))
}

/// Interpret tokenized curl arguments.
///
/// Returns `None` unless the first token is `curl` (any case).
pub fn interpret(tokens: &[String]) -> Option<ParsedCurl> {
    let flags = scan(tokens)?;
    Some(infer_method(flags))
}

/// Single left-to-right pass.
///
/// A flag's argument is consumed together with the flag, so it can never be
/// mistaken for another flag or for the URL.
fn scan(tokens: &[String]) -> Option<CurlFlags> {
    let first = tokens.first()?;
    if !first.eq_ignore_ascii_case("curl") {
        return None;
    }

    let mut flags = CurlFlags::default();
    let mut i = 1;

    while i < tokens.len() {
        let token = tokens[i].as_str();

        if token.starts_with('-') {
            match classify(token) {
                Some((flag, attached)) => {
                    let value = if !flag.takes_argument() {
                        None
                    } else if let Some(v) = attached {
                        Some(v)
                    } else if i + 1 < tokens.len() {
                        i += 1;
                        Some(tokens[i].as_str())
                    } else {
                        debug!(flag = token, "curl option is missing its argument");
                        None
                    };
                    apply_flag(&mut flags, flag, value);
                }
                None => {
                    debug!(flag = token, "ignoring unsupported curl option");
                }
            }
        } else if flags.url.is_none() && !token.eq_ignore_ascii_case("curl") {
            flags.url = Some(token.to_string());
        }

        i += 1;
    }

    Some(flags)
}

/// Resolve a flag token, including short flags with attached values (`-XPOST`)
fn classify(token: &str) -> Option<(Flag, Option<&str>)> {
    if let Some(flag) = Flag::lookup(token) {
        return Some((flag, None));
    }

    if token.starts_with("--") || token.len() <= 2 || !token.is_char_boundary(2) {
        return None;
    }

    let (name, rest) = token.split_at(2);
    Flag::lookup(name)
        .filter(|flag| flag.takes_argument())
        .map(|flag| (flag, Some(rest)))
}

fn apply_flag(flags: &mut CurlFlags, flag: Flag, value: Option<&str>) {
    if flag == Flag::Head {
        flags.method = Some(http::Method::Head.as_str().to_string());
        return;
    }

    let Some(value) = value else {
        return;
    };

    match flag {
        Flag::Method => flags.method = Some(value.trim().to_uppercase()),
        Flag::Header => match parse_header(value) {
            Some((name, val)) => {
                flags.headers.insert(name, val);
            }
            None => debug!(header = value, "skipping header without a name"),
        },
        Flag::Data => flags.data.push(value.to_string()),
        Flag::DataUrlencode => flags.data.push(urlencode_data(value)),
        Flag::UserAgent => set_header(flags, "User-Agent", value),
        Flag::Cookie => set_header(flags, "Cookie", value),
        Flag::Referer => set_header(flags, "Referer", value),
        Flag::User => {
            let credentials = if value.contains(':') {
                value.to_string()
            } else {
                format!("{}:", value)
            };
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            set_header(flags, "Authorization", &format!("Basic {}", encoded));
        }
        Flag::Url => {
            if flags.url.is_none() {
                flags.url = Some(value.to_string());
            }
        }
        Flag::Head | Flag::Skip => {}
    }
}

fn set_header(flags: &mut CurlFlags, name: &str, value: &str) {
    flags.headers.insert(name.to_string(), value.trim().to_string());
}

/// Promote GET to POST when data is present and no method was given.
///
/// An explicit method always wins, even `-X GET` with a body.
fn infer_method(flags: CurlFlags) -> ParsedCurl {
    let body = if flags.data.is_empty() {
        None
    } else {
        Some(flags.data.join("&"))
    };

    let method = flags
        .method
        .unwrap_or_else(|| http::infer(body.is_some()).as_str().to_string());

    ParsedCurl {
        url: flags.url,
        method,
        headers: flags.headers,
        body,
    }
}

/// Parse a header string "Name: Value", splitting on the first colon
fn parse_header(header: &str) -> Option<(String, String)> {
    let (name, value) = header.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// `--data-urlencode` forms: `content`, `=content`, `name=content`
fn urlencode_data(data: &str) -> String {
    match data.split_once('=') {
        Some(("", content)) => urlencoding::encode(content).into_owned(),
        Some((name, content)) => format!("{}={}", name, urlencoding::encode(content)),
        None => urlencoding::encode(data).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(cmd: &str) -> ParsedCurl {
        parse_curl_command(cmd).expect("should be a curl command")
    }

    #[test]
    fn test_simple_get() {
        let parsed = parse("curl https://x/y");
        assert_eq!(parsed.url.as_deref(), Some("https://x/y"));
        assert_eq!(parsed.method, "GET");
        assert!(parsed.headers.is_empty());
        assert!(parsed.body.is_none());
    }

    #[test]
    fn test_not_a_curl_command() {
        assert!(parse_curl_command("not a curl command").is_none());
        assert!(parse_curl_command("").is_none());
        assert!(parse_curl_command("wget https://x").is_none());
    }

    #[test]
    fn test_curl_keyword_case_insensitive() {
        assert_eq!(parse("CURL https://x").url.as_deref(), Some("https://x"));
    }

    #[test]
    fn test_data_promotes_to_post() {
        let parsed = parse("curl -d 'a=1' https://x/y");
        assert_eq!(parsed.method, "POST");
        assert_eq!(parsed.body.as_deref(), Some("a=1"));
    }

    #[test]
    fn test_explicit_get_with_data_is_kept() {
        let parsed = parse("curl -X GET -d 'a=1' https://x/y");
        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.body.as_deref(), Some("a=1"));
    }

    #[test]
    fn test_method_uppercased() {
        assert_eq!(parse("curl --request patch https://x").method, "PATCH");
        assert_eq!(parse("curl -Xdelete https://x").method, "DELETE");
    }

    #[test]
    fn test_header_split_on_first_colon() {
        let parsed = parse("curl -H 'Authorization: Bearer abc:def' https://x");
        assert_eq!(parsed.headers.get("Authorization").map(String::as_str), Some("Bearer abc:def"));
    }

    // Headers are single-valued: the last -H for a key wins.
    #[test]
    fn test_duplicate_header_last_wins() {
        let parsed = parse("curl -H 'X-A: 1' -H 'X-B: 2' -H 'X-A: 3' https://x");
        assert_eq!(parsed.headers.len(), 2);
        assert_eq!(parsed.headers["X-A"], "3");
    }

    #[test]
    fn test_header_keys_are_case_sensitive() {
        let parsed = parse("curl -H 'accept: a' -H 'Accept: b' https://x");
        assert_eq!(parsed.headers.len(), 2);
    }

    #[test]
    fn test_header_without_colon_is_skipped() {
        let parsed = parse("curl -H 'NoColon' -H ': empty' https://x");
        assert!(parsed.headers.is_empty());
    }

    #[test]
    fn test_data_fragments_joined() {
        let parsed = parse("curl --data a=1 --data-raw b=2 --data-binary 'c=3' https://x");
        assert_eq!(parsed.body.as_deref(), Some("a=1&b=2&c=3"));
        assert_eq!(parsed.method, "POST");
    }

    #[test]
    fn test_data_urlencode() {
        let parsed = parse("curl --data-urlencode 'q=hello world' --data-urlencode '=a&b' https://x");
        assert_eq!(parsed.body.as_deref(), Some("q=hello%20world&a%26b"));
    }

    #[test]
    fn test_flag_argument_never_becomes_url() {
        let parsed = parse("curl -H 'X: y' -d payload https://x/y");
        assert_eq!(parsed.url.as_deref(), Some("https://x/y"));
    }

    #[test]
    fn test_first_bare_token_is_url() {
        let parsed = parse("curl https://first https://second");
        assert_eq!(parsed.url.as_deref(), Some("https://first"));
    }

    #[test]
    fn test_unknown_flags_ignored() {
        let parsed = parse("curl -sSL --compressed -v https://x/y");
        assert_eq!(parsed.url.as_deref(), Some("https://x/y"));
        assert_eq!(parsed.method, "GET");
    }

    #[test]
    fn test_known_argument_options_consume_argument() {
        let parsed = parse("curl -o out.json --max-time 5 https://x/y");
        assert_eq!(parsed.url.as_deref(), Some("https://x/y"));
    }

    #[test]
    fn test_missing_url() {
        let parsed = parse("curl -X POST -d a=1");
        assert!(parsed.url.is_none());
        assert_eq!(parsed.method, "POST");
    }

    #[test]
    fn test_trailing_flag_without_argument() {
        let parsed = parse("curl https://x -H");
        assert_eq!(parsed.url.as_deref(), Some("https://x"));
        assert!(parsed.headers.is_empty());
    }

    #[test]
    fn test_head_flag() {
        let parsed = parse("curl -I https://x");
        assert_eq!(parsed.method, "HEAD");
    }

    #[test]
    fn test_header_shortcuts() {
        let parsed = parse("curl -A 'agent/1.0' -b 'sid=1' -e https://ref https://x");
        assert_eq!(parsed.headers["User-Agent"], "agent/1.0");
        assert_eq!(parsed.headers["Cookie"], "sid=1");
        assert_eq!(parsed.headers["Referer"], "https://ref");
        assert_eq!(parsed.url.as_deref(), Some("https://x"));
    }

    #[test]
    fn test_basic_auth() {
        let parsed = parse("curl -u user:pass https://x");
        assert_eq!(parsed.headers["Authorization"], "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_url_option() {
        let parsed = parse("curl --url https://x/y -d a=1");
        assert_eq!(parsed.url.as_deref(), Some("https://x/y"));
    }

    #[test]
    fn test_multiline_command() {
        let cmd = "curl -X PUT 'https://api.example.com/items/1' \\\n  -H 'Content-Type: application/json' \\\n  -d '{\"name\":\"x\"}'";
        let parsed = parse(cmd);
        assert_eq!(parsed.method, "PUT");
        assert_eq!(parsed.url.as_deref(), Some("https://api.example.com/items/1"));
        assert_eq!(parsed.headers["Content-Type"], "application/json");
        assert_eq!(parsed.body.as_deref(), Some(r#"{"name":"x"}"#));
    }

    #[test]
    fn test_interpret_tokens_directly() {
        let tokens: Vec<String> = ["curl", "-X", "post", "https://x"].iter().map(|s| s.to_string()).collect();
        let parsed = interpret(&tokens).unwrap();
        assert_eq!(parsed.method, "POST");
        assert!(interpret(&[]).is_none());
    }
}
