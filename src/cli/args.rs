//! CLI argument definitions using clap

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Read a value from the command line, `-` means stdin
pub const STDIN_MARKER: &str = "-";

#[derive(Parser, Debug, Clone)]
#[command(name = "curlkit", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Debug logging, overrides CURLKIT_LOG
    #[arg(long = "debug", global = true, action = ArgAction::SetTrue)]
    pub debug: bool,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Configuration directory (config.toml, history.jsonl)
    #[arg(long = "config-dir", value_name = "DIR", global = true, env = "CURLKIT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a cURL command and print the resulting request as JSON
    Import {
        /// The cURL command, or - to read it from stdin
        #[arg(value_name = "CURL")]
        curl: String,
    },

    /// Print a stored request as a cURL command
    Export {
        /// Request JSON file, or - to read it from stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Substitute variables from this environment before exporting
        #[arg(long = "env", value_name = "FILE")]
        env: Option<PathBuf>,
    },

    /// Send a request and print the response
    Send(SendArgs),

    /// List placeholders a request uses that an environment does not define
    Vars {
        /// The cURL command, or - to read it from stdin
        #[arg(value_name = "CURL")]
        curl: String,

        /// Environment file (.json or dotenv)
        #[arg(long = "env", value_name = "FILE")]
        env: Option<PathBuf>,
    },

    /// Show recorded requests, most recent last
    History {
        /// Only show the last N entries
        #[arg(short = 'n', long = "limit", value_name = "N")]
        limit: Option<usize>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SendArgs {
    /// The cURL command, or - to read it from stdin
    #[arg(value_name = "CURL", required_unless_present = "request", conflicts_with = "request")]
    pub curl: Option<String>,

    /// Send a stored request (JSON) instead of a cURL command
    #[arg(long = "request", value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Environment file (.json or dotenv)
    #[arg(long = "env", value_name = "FILE")]
    pub env: Option<PathBuf>,

    /// Request timeout in seconds, overrides the configured value
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Keep history in memory only
    #[arg(long = "no-history", action = ArgAction::SetTrue)]
    pub no_history: bool,

    /// Exit with an error status on non-2xx responses
    #[arg(long = "check-status", action = ArgAction::SetTrue)]
    pub check_status: bool,

    /// Print the resolved request as a cURL command instead of sending it
    #[arg(long = "offline", action = ArgAction::SetTrue)]
    pub offline: bool,
}

/// Log format for structured output (CI/CD)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
