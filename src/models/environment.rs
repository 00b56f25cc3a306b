//! Named variable sets used for `{{variable}}` templating
//!
//! Environments load from a JSON record or from a `.env` file:
//!
//! ```text
//! # staging
//! HOST=api.staging.example.com
//! TOKEN="abc\n123"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::CurlkitError;
use crate::models::request::new_id;

/// A single environment variable
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub description: String,
}

/// A named bag of variables.
///
/// The engine only ever reads an environment; mutation happens through
/// [`Environment::set_variable`] and [`Environment::remove_variable`] by the
/// owner of the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub variables: IndexMap<String, Variable>,
}

impl Environment {
    /// Create an empty environment
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: String::new(),
            variables: IndexMap::new(),
        }
    }

    /// Insert or replace a variable
    pub fn set_variable(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) {
        let key = key.into();
        self.variables.insert(
            key.clone(),
            Variable {
                key,
                value: value.into(),
                description: description.into(),
            },
        );
    }

    /// Remove a variable, returning it if it existed
    pub fn remove_variable(&mut self, key: &str) -> Option<Variable> {
        self.variables.shift_remove(key)
    }

    /// Builder-style variant of [`Environment::set_variable`]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_variable(key, value, "");
        self
    }

    /// The usable value of a variable.
    ///
    /// Empty values count as unset so their placeholders stay visible.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.variables
            .get(key)
            .map(|v| v.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Check if a variable exists, regardless of its value
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Parse the JSON record form
    pub fn from_json(content: &str) -> Result<Self, CurlkitError> {
        let mut env: Environment = serde_json::from_str(content)?;
        for (key, var) in env.variables.iter_mut() {
            if var.key.is_empty() {
                var.key = key.clone();
            }
        }
        Ok(env)
    }

    /// Parse `.env` file content
    pub fn from_dotenv(name: impl Into<String>, content: &str) -> Result<Self, CurlkitError> {
        let mut env = Self::new(name);

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = parse_env_line(line).ok_or_else(|| {
                CurlkitError::Environment(format!(
                    "Invalid .env syntax at line {}: {}",
                    line_num + 1,
                    line
                ))
            })?;
            env.set_variable(key, value, "");
        }

        Ok(env)
    }

    /// Load from a file; `.json` files use the record form, anything else is
    /// read as `.env`
    pub fn load(path: &Path) -> Result<Self, CurlkitError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CurlkitError::Environment(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            let mut env = Self::from_json(&content)?;
            if env.name.is_empty() {
                env.name = file_label(path);
            }
            Ok(env)
        } else {
            Self::from_dotenv(file_label(path), &content)
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "env".to_string())
}

/// Parse a single .env line into key-value pair
fn parse_env_line(line: &str) -> Option<(String, String)> {
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value_part) = line.split_once('=')?;
    let key = key.trim();

    if key.is_empty() {
        return None;
    }

    let value_part = value_part.trim();

    let value = if value_part.len() >= 2 && value_part.starts_with('"') && value_part.ends_with('"') {
        unescape_double_quoted(&value_part[1..value_part.len() - 1])
    } else if value_part.len() >= 2 && value_part.starts_with('\'') && value_part.ends_with('\'') {
        value_part[1..value_part.len() - 1].to_string()
    } else {
        // Unquoted: stop at an inline comment
        match value_part.find(" #") {
            Some(pos) => value_part[..pos].trim().to_string(),
            None if value_part.starts_with('#') => String::new(),
            None => value_part.to_string(),
        }
    };

    Some((key.to_string(), value))
}

/// Unescape double-quoted string
fn unescape_double_quoted(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('$') => result.push('$'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
