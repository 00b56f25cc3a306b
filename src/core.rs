use clap::Parser;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, LogFormat, SendArgs, STDIN_MARKER};
use crate::client::ReqwestTransport;
use crate::config::{Config, Settings};
use crate::curl::{generate_curl_command, import_curl};
use crate::dispatch::{self, Dispatcher};
use crate::errors::CurlkitError;
use crate::history::{FileHistory, HistoryStore, MemoryHistory};
use crate::models::{Environment, Request, ResponseSummary};
use crate::status::ExitStatus;
use crate::template;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "CURLKIT_LOG";

const NOT_A_CURL_COMMAND: &str = "not a valid cURL command";

/// Main entry point for the CLI.
///
/// Parses arguments, sets up logging and configuration, and runs the
/// selected subcommand on a single-threaded runtime.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(&parsed);
    debug!(?parsed, "arguments");

    let config = load_config(&parsed);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => return handle_error(e.into(), parsed.debug),
    };

    let debug = parsed.debug;
    match runtime.block_on(program(parsed, config)) {
        Ok(status) => status,
        Err(e) => handle_error(e, debug),
    }
}

pub async fn program(args: Args, config: Config) -> Result<ExitStatus, CurlkitError> {
    match args.command {
        Command::Import { curl } => handle_import(&curl),
        Command::Export { file, env } => handle_export(&file, env.as_deref()),
        Command::Send(send) => handle_send(send, config).await,
        Command::Vars { curl, env } => handle_vars(&curl, env.as_deref()),
        Command::History { limit } => handle_history(&config, limit),
    }
}

fn init_logging(args: &Args) {
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    let result = match args.log_format.unwrap_or_default() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    // Already initialized when run more than once in a process
    result.ok();
}

fn load_config(args: &Args) -> Config {
    let loaded = match args.config_dir {
        Some(ref dir) => Config::load_from(dir),
        None => Config::load(),
    };

    match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}", e);
            match args.config_dir {
                Some(ref dir) => Config {
                    config_dir: dir.clone(),
                    ..Config::default()
                },
                None => Config::default(),
            }
        }
    }
}

fn handle_import(curl: &str) -> Result<ExitStatus, CurlkitError> {
    let request = parse_curl_input(curl)?;
    println!("{}", request.to_json()?);
    Ok(ExitStatus::Success)
}

fn handle_export(file: &str, env_path: Option<&Path>) -> Result<ExitStatus, CurlkitError> {
    let content = if file == STDIN_MARKER {
        read_stdin()?
    } else {
        std::fs::read_to_string(file)?
    };

    let mut request = Request::from_json(&content)?;
    if let Some(path) = env_path {
        let env = Environment::load(path)?;
        warn_unresolved(&request, Some(&env));
        request = template::resolve_request(&request, Some(&env));
    }

    println!("{}", generate_curl_command(&request));
    Ok(ExitStatus::Success)
}

async fn handle_send(args: SendArgs, config: Config) -> Result<ExitStatus, CurlkitError> {
    let request = match (&args.curl, &args.request) {
        (_, Some(path)) => Request::from_json(&std::fs::read_to_string(path)?)?,
        (Some(curl), None) => parse_curl_input(curl)?,
        (None, None) => {
            return Err(CurlkitError::Argument(
                "a cURL command or --request is required".to_string(),
            ))
        }
    };

    let env = args.env.as_deref().map(Environment::load).transpose()?;

    let mut settings = config.settings.clone();
    if let Some(secs) = args.timeout {
        if !secs.is_finite() || secs < 0.0 {
            return Err(CurlkitError::Argument(format!("invalid timeout: {}", secs)));
        }
        settings.timeout = (secs * 1000.0).round() as u64;
    }

    warn_unresolved(&request, env.as_ref());

    if args.offline {
        let descriptor = dispatch::prepare(&request, &settings, env.as_ref())
            .map_err(|e| CurlkitError::Argument(e.to_string()))?;
        println!("{}", generate_curl_command(&descriptor));
        return Ok(ExitStatus::Success);
    }

    let summary = if args.no_history {
        send_with(&request, &settings, env.as_ref(), MemoryHistory::new()).await
    } else {
        let history = FileHistory::new(config.history_file());
        send_with(&request, &settings, env.as_ref(), history).await
    };

    print_summary(&summary);
    Ok(ExitStatus::from_http_status(summary.status_code, args.check_status))
}

async fn send_with<H: HistoryStore>(
    request: &Request,
    settings: &Settings,
    env: Option<&Environment>,
    history: H,
) -> ResponseSummary {
    let dispatcher = Dispatcher::new(ReqwestTransport::new(), history);
    dispatcher.dispatch(request, settings, env).await
}

fn handle_vars(curl: &str, env_path: Option<&Path>) -> Result<ExitStatus, CurlkitError> {
    let request = parse_curl_input(curl)?;
    let env = env_path.map(Environment::load).transpose()?;

    for name in template::unresolved_in_request(&request, env.as_ref()) {
        if env.as_ref().is_some_and(|e| e.contains(&name)) {
            println!("{}  (empty)", name);
        } else {
            println!("{}", name);
        }
    }
    Ok(ExitStatus::Success)
}

fn handle_history(config: &Config, limit: Option<usize>) -> Result<ExitStatus, CurlkitError> {
    let entries = FileHistory::new(config.history_file()).load()?;
    let skip = limit.map(|n| entries.len().saturating_sub(n)).unwrap_or(0);

    for entry in entries.iter().skip(skip) {
        let status = entry
            .response
            .as_ref()
            .map(|r| if r.status == 0 { r.status_text.clone() } else { r.status.to_string() })
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {:<7} {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.request.method,
            entry.request.url,
            status
        );
    }
    Ok(ExitStatus::Success)
}

/// Parse a command given inline or on stdin
fn parse_curl_input(value: &str) -> Result<Request, CurlkitError> {
    let command = if value == STDIN_MARKER {
        read_stdin()?
    } else {
        value.to_string()
    };

    import_curl(&command).ok_or_else(|| CurlkitError::Parse(NOT_A_CURL_COMMAND.to_string()))
}

fn read_stdin() -> Result<String, CurlkitError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn warn_unresolved(request: &Request, env: Option<&Environment>) {
    let unresolved = template::unresolved_in_request(request, env);
    if !unresolved.is_empty() {
        eprintln!("Warning: unresolved variables: {}", unresolved.join(", "));
    }
}

fn print_summary(summary: &ResponseSummary) {
    if summary.is_failure() {
        eprintln!("Error: {}", summary.status);
        return;
    }

    println!("{}", summary.status);
    for (name, value) in &summary.headers {
        println!("{}: {}", name, value);
    }

    let body = summary.body_text();
    if !body.is_empty() {
        println!();
        println!("{}", body);
    }
    debug!(elapsed_ms = summary.response_time, "done");
}

fn handle_error(error: CurlkitError, debug: bool) -> ExitStatus {
    if debug {
        eprintln!("Error: {:?}", error);
    } else {
        eprintln!("Error: {}", error);
    }

    ExitStatus::Error
}
