//! Advice Slip API client
//!
//! Fetches one piece of advice per request and maps every way that can go
//! wrong onto the two user-facing error kinds.

use chrono::Utc;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::Advice;

/// Default advice endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.adviceslip.com/advice";

/// User-facing classification of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP or transport failure
    Network,
    /// Well-formed response without any advice in it
    EmptyResult,
}

/// Errors that can occur when fetching advice
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// Response body was not JSON
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response had no `slip.advice` text
    #[error("No advice found in response")]
    EmptyResult,
}

impl FetchError {
    /// Classifies the error for the UI
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::EmptyResult => ErrorKind::EmptyResult,
            FetchError::RequestFailed(_) | FetchError::Status(_) | FetchError::ParseError(_) => {
                ErrorKind::Network
            }
        }
    }

    /// Short message for the transient notification
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Network => "Network error",
            ErrorKind::EmptyResult => "No advice found",
        }
    }
}

/// Appends a `ts` query parameter so intermediate caches never serve a
/// stale slip.
pub fn cache_busting_url(endpoint: &str, epoch_millis: i64) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}ts={}", endpoint, separator, epoch_millis)
}

/// Client for fetching advice slips
#[derive(Debug, Clone)]
pub struct AdviceClient {
    client: Client,
}

impl Default for AdviceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AdviceClient {
    /// Create a new AdviceClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch one piece of advice from `endpoint`
    ///
    /// # Returns
    /// * `Ok(Advice)` - The advice text and slip id
    /// * `Err(FetchError)` - If the request fails, the status is not a
    ///   success, the body is not JSON, or the body carries no advice
    pub async fn fetch_advice(&self, endpoint: &str) -> Result<Advice, FetchError> {
        let url = cache_busting_url(endpoint, Utc::now().timestamp_millis());
        debug!(%url, "requesting advice");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        parse_slip(&text)
    }
}

/// Extracts advice from a `{"slip": {"advice": ..., "id": ...}}` body
pub(crate) fn parse_slip(body: &str) -> Result<Advice, FetchError> {
    let value: Value = serde_json::from_str(body)?;

    let text = value
        .pointer("/slip/advice")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .ok_or(FetchError::EmptyResult)?;
    // Fractional or non-numeric ids are dropped
    let id = value.pointer("/slip/id").and_then(Value::as_i64);

    Ok(Advice::new(text, id))
}
