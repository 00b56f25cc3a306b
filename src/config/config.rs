//! Config file handling
//!
//! Settings live in `config.toml` inside the config directory:
//!
//! ```toml
//! [defaults]
//! timeout = 10000          # milliseconds, 0 disables
//! follow_redirects = true
//! max_redirects = 5
//! ssl_verification = false
//!
//! [defaults.headers]
//! User-Agent = "curlkit"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::CurlkitError;
use crate::models::HeadersDict;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "CURLKIT_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";
const HISTORY_FILE: &str = "history.jsonl";

/// Dispatch defaults, merged under each request's own values
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Request timeout in milliseconds; 0 means no timeout
    pub timeout: u64,
    pub follow_redirects: bool,
    pub max_redirects: u32,
    #[serde(rename = "headers")]
    pub default_headers: HeadersDict,
    pub ssl_verification: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: 30_000,
            follow_redirects: true,
            max_redirects: 10,
            default_headers: HeadersDict::new(),
            ssl_verification: true,
        }
    }
}

impl Settings {
    /// Timeout as a duration, `None` when disabled
    pub fn timeout_duration(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_millis(self.timeout))
    }

    /// Parse the `[defaults]` table of a config file
    pub fn from_toml(content: &str) -> Result<Self, CurlkitError> {
        #[derive(Deserialize, Default)]
        struct ConfigFile {
            #[serde(default)]
            defaults: Settings,
        }

        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| CurlkitError::Config(format!("Invalid config TOML: {}", e)))?;
        Ok(file.defaults)
    }
}

/// curlkit configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            settings: Settings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default config directory
    pub fn load() -> Result<Self, CurlkitError> {
        Self::load_from(&Self::default_config_dir())
    }

    /// Load configuration from a specific directory.
    ///
    /// A missing config file yields defaults.
    pub fn load_from(config_dir: &Path) -> Result<Self, CurlkitError> {
        let config_file = config_dir.join(CONFIG_FILE);

        if !config_file.exists() {
            return Ok(Self {
                config_dir: config_dir.to_path_buf(),
                settings: Settings::default(),
            });
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| CurlkitError::Config(format!("Failed to read config: {}", e)))?;

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            settings: Settings::from_toml(&content)?,
        })
    }

    /// Get the default config directory
    pub fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("curlkit"))
            .unwrap_or_else(|| PathBuf::from(".curlkit"))
    }

    /// Get the history file path
    pub fn history_file(&self) -> PathBuf {
        self.config_dir.join(HISTORY_FILE)
    }
}
