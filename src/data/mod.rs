//! Core data models for Daily Advice
//!
//! This module contains the advice type shared by the HTTP client, the daily
//! cache and the UI, plus the client that fetches it.

pub mod slip;

pub use slip::{cache_busting_url, AdviceClient, ErrorKind, FetchError, DEFAULT_ENDPOINT};

use serde::{Deserialize, Serialize};

/// A single piece of advice as shown on screen
///
/// Replaced wholesale on each fetch. `text` is never empty for values produced
/// by [`AdviceClient`] or loaded from the daily cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    /// The advice text
    pub text: String,
    /// Slip identifier from the advice service, if it sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Advice {
    /// Creates a new Advice
    pub fn new(text: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            text: text.into(),
            id,
        }
    }

    /// Heading shown above the advice text
    ///
    /// A zero id counts as no id.
    pub fn heading(&self) -> String {
        match self.id {
            Some(id) if id != 0 => format!("Slip {}", id),
            _ => "Today".to_string(),
        }
    }
}
