//! Shell-style word splitting for curl commands
//!
//! Handles the quoting that shows up in commands copied from terminals and
//! browsers: single quotes, double quotes, `$'...'` ANSI-C quotes, backslash
//! escapes and `\`-newline continuations. Adjacent quoted and unquoted
//! fragments join into one word, so `'it'\''s'` reads back as `it's`.
//!
//! Everything else a shell does (expansion, pipes, globbing) is out of scope:
//! `$HOME` stays the literal text `$HOME`.

use std::iter::Peekable;
use std::str::Chars;

/// Split a command line into words.
///
/// Never fails: an unterminated quote captures the rest of the input.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Tracks whether a word is open, so '' yields an empty token
    let mut in_word = false;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                // Line continuation
                Some('\n') => {}
                Some('\r') if chars.peek() == Some(&'\n') => {
                    chars.next();
                }
                Some(next) => {
                    current.push(next);
                    in_word = true;
                }
                None => {
                    current.push('\\');
                    in_word = true;
                }
            },
            '\'' => {
                read_single_quoted(&mut chars, &mut current);
                in_word = true;
            }
            '"' => {
                read_double_quoted(&mut chars, &mut current);
                in_word = true;
            }
            '$' if chars.peek() == Some(&'\'') => {
                chars.next();
                read_ansi_c_quoted(&mut chars, &mut current);
                in_word = true;
            }
            c if c.is_whitespace() => {
                if in_word {
                    tokens.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            _ => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_word {
        tokens.push(current);
    }

    tokens
}

/// Everything up to the closing `'` is literal
fn read_single_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    for c in chars.by_ref() {
        if c == '\'' {
            return;
        }
        out.push(c);
    }
}

/// Inside double quotes only `\"`, `\\`, `` \` ``, `\$` and `\`-newline are escapes
fn read_double_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '"' => return,
            '\\' => match chars.peek().copied() {
                Some(next @ ('"' | '\\' | '`' | '$')) => {
                    chars.next();
                    out.push(next);
                }
                Some('\n') => {
                    chars.next();
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
}

/// `$'...'` strings as emitted by browser "Copy as cURL"
fn read_ansi_c_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '\'' => return,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(e @ ('\\' | '\'' | '"' | '?')) => out.push(e),
                Some('x') => push_hex_escape(chars, out),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
}

/// `\xHH` with one or two hex digits
fn push_hex_escape(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let mut digits = String::new();
    while digits.len() < 2 {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }

    match u8::from_str_radix(&digits, 16) {
        Ok(byte) if byte.is_ascii() => out.push(byte as char),
        _ => {
            out.push_str("\\x");
            out.push_str(&digits);
        }
    }
}
