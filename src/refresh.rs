//! Background advice fetching
//!
//! Runs at most one fetch at a time on a tokio task and hands results back to
//! the UI loop over a channel. Starting a new fetch cancels the outstanding
//! one; whatever the cancelled task eventually sends is dropped.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::cache::DailyCache;
use crate::data::{Advice, AdviceClient, FetchError};

/// How a fetch settled
#[derive(Debug)]
pub enum FetchOutcome {
    /// Advice arrived and was saved to the daily cache
    Success(Advice),
    /// The request or the response was unusable
    Failure(FetchError),
    /// A newer fetch (or shutdown) aborted this one
    Cancelled,
}

/// Fetch lifecycle as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing has been requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The last fetch produced advice
    Succeeded,
    /// The last fetch failed
    Failed,
    /// The last fetch was aborted and nothing replaced it
    Cancelled,
}

/// Message sent from a fetch task back to the controller
#[derive(Debug)]
struct FetchMessage {
    generation: u64,
    outcome: FetchOutcome,
}

/// The fetch currently allowed to settle
#[derive(Debug)]
struct InFlight {
    generation: u64,
    cancel: oneshot::Sender<()>,
}

/// Owns the single in-flight fetch and the daily cache it feeds
pub struct FetchController {
    client: AdviceClient,
    cache: DailyCache,
    sender: mpsc::UnboundedSender<FetchMessage>,
    receiver: mpsc::UnboundedReceiver<FetchMessage>,
    in_flight: Option<InFlight>,
    generation: u64,
    state: FetchState,
}

impl FetchController {
    /// Creates a controller that saves successful fetches into `cache`
    pub fn new(client: AdviceClient, cache: DailyCache) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            client,
            cache,
            sender,
            receiver,
            in_flight: None,
            generation: 0,
            state: FetchState::Idle,
        }
    }

    /// The daily cache this controller writes to
    pub fn cache(&self) -> &DailyCache {
        &self.cache
    }

    /// Current lifecycle state
    pub fn state(&self) -> FetchState {
        self.state
    }

    /// True between dispatch and settlement of the current fetch
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts fetching from `endpoint`, cancelling any outstanding fetch
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, endpoint: &str) {
        if let Some(previous) = self.in_flight.take() {
            debug!(generation = previous.generation, "cancelling outstanding fetch");
            let _ = previous.cancel.send(());
        }

        self.generation += 1;
        let generation = self.generation;
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.in_flight = Some(InFlight {
            generation,
            cancel: cancel_tx,
        });
        self.state = FetchState::Loading;

        let client = self.client.clone();
        let endpoint = endpoint.to_string();
        let tx = self.sender.clone();

        debug!(generation, %endpoint, "starting fetch");
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = cancel_rx => FetchOutcome::Cancelled,
                result = client.fetch_advice(&endpoint) => match result {
                    Ok(advice) => FetchOutcome::Success(advice),
                    Err(e) => FetchOutcome::Failure(e),
                },
            };
            let _ = tx.send(FetchMessage { generation, outcome });
        });
    }

    /// Aborts the outstanding fetch, if any
    pub fn cancel(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            debug!(generation = previous.generation, "fetch cancelled");
            let _ = previous.cancel.send(());
            self.state = FetchState::Cancelled;
        }
    }

    /// Returns the settlement of the current fetch if it has arrived
    ///
    /// Never blocks. Settlements of cancelled fetches are consumed and
    /// discarded, so this only yields `Success` or `Failure`.
    pub fn try_recv(&mut self) -> Option<FetchOutcome> {
        while let Ok(message) = self.receiver.try_recv() {
            if let Some(outcome) = self.accept(message) {
                return Some(outcome);
            }
        }
        None
    }

    /// Waits for the current fetch to settle
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn settle(&mut self) -> Option<FetchOutcome> {
        while self.in_flight.is_some() {
            let message = self.receiver.recv().await?;
            if let Some(outcome) = self.accept(message) {
                return Some(outcome);
            }
        }
        None
    }

    /// Applies a message from a fetch task; stale ones are dropped
    fn accept(&mut self, message: FetchMessage) -> Option<FetchOutcome> {
        let current = self.in_flight.as_ref()?;
        if current.generation != message.generation {
            debug!(generation = message.generation, "dropping stale fetch result");
            return None;
        }
        if matches!(message.outcome, FetchOutcome::Cancelled) {
            return None;
        }

        self.in_flight = None;
        match &message.outcome {
            FetchOutcome::Success(advice) => {
                info!(id = ?advice.id, "fetched advice");
                self.state = FetchState::Succeeded;
                self.cache.save(advice);
            }
            FetchOutcome::Failure(e) => {
                warn!("advice fetch failed: {}", e);
                self.state = FetchState::Failed;
            }
            FetchOutcome::Cancelled => {}
        }
        Some(message.outcome)
    }
}

impl Drop for FetchController {
    fn drop(&mut self) {
        self.cancel();
    }
}
