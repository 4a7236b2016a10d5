//! Application state management for Daily Advice
//!
//! This module contains the single owning state container for the screen:
//! the advice on display, the notification, and the fetch controller. Key
//! presses and fetch settlements are the only things that change it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::cache::DailyCache;
use crate::clipboard::{copy_advice, ClipboardWriter, SystemClipboard};
use crate::data::{Advice, AdviceClient};
use crate::notify::Notifier;
use crate::refresh::{FetchController, FetchOutcome};

/// What the main area of the screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// A fetch is in flight
    Loading,
    /// Advice is available
    Advice(&'a Advice),
    /// Nothing loaded yet (first fetch failed)
    Empty,
}

/// Main application struct managing state and data
pub struct App {
    /// Advice currently on display
    pub advice: Option<Advice>,
    /// Transient notification shown at the bottom of the screen
    pub notifier: Notifier,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Endpoint every fetch goes to
    endpoint: String,
    /// Owner of the single in-flight fetch
    controller: FetchController,
    /// Clipboard target for copy
    clipboard: Box<dyn ClipboardWriter>,
}

impl App {
    /// Creates a new App fetching from `endpoint` and caching into `cache`
    pub fn new(endpoint: impl Into<String>, cache: DailyCache) -> Self {
        Self::with_clipboard(endpoint, cache, Box::new(SystemClipboard::new()))
    }

    /// Creates a new App with a custom clipboard
    pub fn with_clipboard(
        endpoint: impl Into<String>,
        cache: DailyCache,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> Self {
        Self {
            advice: None,
            notifier: Notifier::new(),
            should_quit: false,
            show_help: false,
            endpoint: endpoint.into(),
            controller: FetchController::new(AdviceClient::new(), cache),
            clipboard,
        }
    }

    /// The endpoint advice is fetched from
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// True while a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.controller.is_busy()
    }

    /// What the main area should render
    pub fn view(&self) -> View<'_> {
        if self.is_loading() {
            return View::Loading;
        }
        match &self.advice {
            Some(advice) => View::Advice(advice),
            None => View::Empty,
        }
    }

    /// Shows today's cached advice, or fetches a new one on a miss
    pub fn start(&mut self) {
        match self.controller.cache().load() {
            Some(advice) => self.advice = Some(advice),
            None => self.fetch(),
        }
    }

    /// Invalidates today's advice and fetches a new one
    pub fn refresh(&mut self) {
        info!("manual refresh");
        self.controller.cache().invalidate();
        self.fetch();
    }

    /// A new fetch supersedes whatever the last one reported
    fn fetch(&mut self) {
        self.notifier.dismiss();
        self.controller.start(&self.endpoint);
    }

    /// Copies the advice on display to the clipboard
    ///
    /// Does nothing when no advice is loaded.
    pub fn copy(&mut self) {
        let Some(advice) = self.advice.as_ref() else {
            return;
        };
        match copy_advice(self.clipboard.as_mut(), advice) {
            Ok(()) => self.notifier.success("Copied"),
            Err(e) => {
                warn!("{}", e);
                self.notifier.error(e.user_message());
            }
        }
    }

    /// Applies a settled fetch and expires old notifications
    ///
    /// Called once per event-loop iteration.
    pub fn on_tick(&mut self) {
        while let Some(outcome) = self.controller.try_recv() {
            self.apply(outcome);
        }
        self.notifier.tick();
    }

    /// Waits for the in-flight fetch and applies it
    pub async fn settle(&mut self) {
        if let Some(outcome) = self.controller.settle().await {
            self.apply(outcome);
        }
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Success(advice) => self.advice = Some(advice),
            FetchOutcome::Failure(e) => self.notifier.error(e.user_message()),
            FetchOutcome::Cancelled => {}
        }
    }

    /// Aborts any in-flight fetch
    pub fn shutdown(&mut self) {
        self.controller.cancel();
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`, `Esc` or `Ctrl+C`: Quit the application
    /// - `r`: Fetch new advice, ignoring today's cache
    /// - `c` or `y`: Copy the advice to the clipboard
    /// - `?`: Toggle help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            KeyCode::Char('c') | KeyCode::Char('y') => {
                self.copy();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }
}
