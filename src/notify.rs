//! Transient notifications
//!
//! One notification is visible at a time; showing a new one replaces the
//! current one. Each expires on its own after a fixed duration.

use std::time::{Duration, Instant};

/// How long error notifications stay on screen
pub const ERROR_TTL: Duration = Duration::from_secs(3);

/// How long success notifications stay on screen
pub const SUCCESS_TTL: Duration = Duration::from_secs(2);

/// Kind of notification, which decides its colour and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Confirmation such as "Copied"
    Success,
    /// A fetch or copy failed
    Error,
}

/// A message shown until `expires_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user
    pub message: String,
    /// Kind of message
    pub severity: Severity,
    expires_at: Instant,
}

/// Holds the currently visible notification, if any
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notification>,
}

impl Notifier {
    /// Creates a notifier with nothing on screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows an error message
    pub fn error(&mut self, message: impl Into<String>) {
        self.show_at(message, Severity::Error, Instant::now());
    }

    /// Shows a success message
    pub fn success(&mut self, message: impl Into<String>) {
        self.show_at(message, Severity::Success, Instant::now());
    }

    /// Shows a message as of `now`
    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let ttl = match severity {
            Severity::Error => ERROR_TTL,
            Severity::Success => SUCCESS_TTL,
        };
        self.current = Some(Notification {
            message: message.into(),
            severity,
            expires_at: now + ttl,
        });
    }

    /// The visible notification
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Drops the notification once it has expired
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Drops the notification if it has expired as of `now`
    pub fn tick_at(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|n| now >= n.expires_at)
        {
            self.current = None;
        }
    }

    /// Hides the notification right away
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
