//! Integration tests for CLI argument handling
//!
//! Runs the binary for the flags that don't need a terminal: --help, invalid
//! endpoints, and --print against a mock advice server.

use std::process::Command;

use mockito::{Matcher, Mock, Server, ServerGuard};
use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_dailyadvice"))
        .args(args)
        .output()
        .expect("Failed to execute dailyadvice")
}

/// Mocks the advice endpoint, expecting `hits` cache-busted requests
fn mock_advice(server: &mut ServerGuard, status: usize, body: &str, hits: usize) -> Mock {
    server
        .mock("GET", "/advice")
        .match_query(Matcher::Regex(r"ts=\d+".into()))
        .match_header("accept", "application/json")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create()
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dailyadvice"), "Help should mention dailyadvice");
    assert!(stdout.contains("--endpoint"), "Help should mention --endpoint");
    assert!(stdout.contains("--print"), "Help should mention --print");
}

#[test]
fn test_invalid_endpoint_prints_error_and_exits() {
    let output = run_cli(&["--endpoint", "not-a-url", "--print"]);
    assert!(!output.status.success(), "Expected invalid endpoint to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid endpoint"),
        "Should print error message about invalid endpoint: {}",
        stderr
    );
}

#[test]
fn test_print_fetches_and_caches_advice() {
    let cache_dir = TempDir::new().unwrap();
    let dir = cache_dir.path().to_str().unwrap();
    let mut server = Server::new();
    let mock = mock_advice(
        &mut server,
        200,
        r#"{"slip": {"id": 42, "advice": "Be kind."}}"#,
        1,
    );
    let endpoint = format!("{}/advice", server.url());

    let output = run_cli(&["--print", "--endpoint", &endpoint, "--cache-dir", dir]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "\"Be kind.\"");
    assert!(cache_dir.path().join("advice.daily").exists());
    assert!(cache_dir.path().join("advice.date").exists());

    // Second run is served from the daily cache
    let output = run_cli(&["--print", "--endpoint", &endpoint, "--cache-dir", dir]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "\"Be kind.\"");
    mock.assert();
}

#[test]
fn test_print_fresh_ignores_cache() {
    let cache_dir = TempDir::new().unwrap();
    let dir = cache_dir.path().to_str().unwrap();

    let mut first = Server::new();
    let _first = mock_advice(&mut first, 200, r#"{"slip": {"id": 1, "advice": "First."}}"#, 1);
    let endpoint = format!("{}/advice", first.url());
    let output = run_cli(&["--print", "--endpoint", &endpoint, "--cache-dir", dir]);
    assert!(output.status.success());

    let mut second = Server::new();
    let fresh = mock_advice(&mut second, 200, r#"{"slip": {"id": 2, "advice": "Second."}}"#, 1);
    let endpoint = format!("{}/advice", second.url());
    let output = run_cli(&["--print", "--fresh", "--endpoint", &endpoint, "--cache-dir", dir]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "\"Second.\"");
    fresh.assert();
}

#[test]
fn test_print_server_error_fails_without_cache_write() {
    let cache_dir = TempDir::new().unwrap();
    let dir = cache_dir.path().to_str().unwrap();
    let mut server = Server::new();
    let _mock = mock_advice(&mut server, 500, "{}", 1);
    let endpoint = format!("{}/advice", server.url());

    let output = run_cli(&["--print", "--endpoint", &endpoint, "--cache-dir", dir]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Network error"));
    assert!(!cache_dir.path().join("advice.daily").exists());
}

#[test]
fn test_print_empty_result_fails() {
    let cache_dir = TempDir::new().unwrap();
    let dir = cache_dir.path().to_str().unwrap();
    let mut server = Server::new();
    let _mock = mock_advice(&mut server, 200, "{}", 1);
    let endpoint = format!("{}/advice", server.url());

    let output = run_cli(&["--print", "--endpoint", &endpoint, "--cache-dir", dir]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No advice found"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use dailyadvice::cli::{parse_endpoint_arg, Cli, StartupConfig};
    use dailyadvice::data::DEFAULT_ENDPOINT;

    #[test]
    fn test_cli_no_args_uses_defaults() {
        let cli = Cli::parse_from(["dailyadvice"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.print);
        assert!(!config.fresh);
    }

    #[test]
    fn test_parse_endpoint_arg_invalid_returns_error() {
        assert!(parse_endpoint_arg("mailto:someone@example.com").is_err());
    }
}
