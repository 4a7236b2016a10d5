//! Command-line interface parsing for Daily Advice
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the configuration the app starts with.

use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::DEFAULT_ENDPOINT;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The endpoint is not an absolute http(s) URL
    #[error("Invalid endpoint: '{0}'. Expected an absolute http or https URL")]
    InvalidEndpoint(String),
}

/// Daily Advice - one piece of advice per day, in your terminal
#[derive(Parser, Debug)]
#[command(name = "dailyadvice")]
#[command(about = "Advice of the day with refresh and clipboard copy")]
#[command(version)]
pub struct Cli {
    /// Advice endpoint to fetch from
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Directory for the daily cache and the log file
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Ignore today's cached advice and fetch a new one
    #[arg(long)]
    pub fresh: bool,

    /// Print today's advice to stdout and exit instead of opening the UI
    #[arg(long)]
    pub print: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Advice endpoint
    pub endpoint: String,
    /// Explicit storage directory; `None` means the XDG default
    pub cache_dir: Option<PathBuf>,
    /// Invalidate the daily cache before the first lookup
    pub fresh: bool,
    /// Non-interactive mode
    pub print: bool,
}

/// Checks that `s` is an absolute http(s) URL.
///
/// # Returns
/// * `Ok(String)` with the endpoint unchanged
/// * `Err(CliError::InvalidEndpoint)` otherwise
pub fn parse_endpoint_arg(s: &str) -> Result<String, CliError> {
    match Url::parse(s) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(s.to_string()),
        _ => Err(CliError::InvalidEndpoint(s.to_string())),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the endpoint is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(StartupConfig {
            endpoint: parse_endpoint_arg(&cli.endpoint)?,
            cache_dir: cli.cache_dir.clone(),
            fresh: cli.fresh,
            print: cli.print,
        })
    }
}
