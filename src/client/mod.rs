//! Conversion client implementation split into focused submodules.
//!
//! The `ConvertClient` struct and its methods are organized by concern:
//! - [`submit`] - One-shot request submission and response decoding
//! - [`poll`] - Per-session poll loop driving a job to a terminal outcome
//! - [`artifact`] - Fetching the converted artifact after success

mod artifact;
mod poll;
mod submit;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use poll::ConversionHandle;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crate::classify::MessageCatalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Event, SessionId};

/// Session bookkeeping shared by all clones of the client
#[derive(Clone)]
pub(crate) struct SessionState {
    /// Map of active sessions to their cancellation tokens
    pub(crate) active_sessions: Arc<
        tokio::sync::Mutex<std::collections::HashMap<SessionId, tokio_util::sync::CancellationToken>>,
    >,
    /// Monotonic session id counter
    pub(crate) next_session_id: Arc<AtomicI64>,
    /// Flag to indicate whether new sessions are accepted (cleared during shutdown)
    pub(crate) accepting_new: Arc<AtomicBool>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            active_sessions: Arc::new(tokio::sync::Mutex::new(HashMap::new())),
            next_session_id: Arc::new(AtomicI64::new(0)),
            accepting_new: Arc::new(AtomicBool::new(true)),
        }
    }
}

/// Asynchronous conversion job client (cloneable - all fields are Arc-wrapped)
///
/// Submits document-conversion jobs to the configured endpoint, polls each job
/// to a terminal outcome, and broadcasts lifecycle events so consumers can bind
/// UI side effects per session.
///
/// # Example
///
/// ```no_run
/// use doc_convert::{Config, ConversionRequest, ConvertClient, EndpointConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config {
///         endpoint: EndpointConfig {
///             base_url: "http://wiki.example.com".to_string(),
///             ..EndpointConfig::default()
///         },
///         ..Config::default()
///     };
///
///     let client = ConvertClient::new(config)?;
///
///     // Subscribe to events
///     let mut events = client.subscribe();
///     tokio::spawn(async move {
///         while let Ok(event) = events.recv().await {
///             println!("Event: {:?}", event);
///         }
///     });
///
///     let request = ConversionRequest::new("report", "pdf", "12884901890", "65601")
///         .download_as(true);
///     let outcome = client.convert(request).await?;
///     println!("Outcome: {:?}", outcome);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ConvertClient {
    /// HTTP client shared by submissions and artifact fetches
    pub(crate) http: reqwest::Client,
    /// Configuration (wrapped in Arc for sharing across session tasks)
    pub(crate) config: Arc<Config>,
    /// Message catalog built from the configured overrides
    pub(crate) catalog: Arc<MessageCatalog>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Session bookkeeping
    pub(crate) sessions: SessionState,
}

impl ConvertClient {
    /// Create a client from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.endpoint.request_timeout)
            .build()?;

        let catalog = Arc::new(MessageCatalog::with_overrides(config.messages.clone()));
        let (event_tx, _rx) = tokio::sync::broadcast::channel(1000);

        Ok(Self {
            http,
            config: Arc::new(config),
            catalog,
            event_tx,
            sessions: SessionState::new(),
        })
    }

    /// Subscribe to session lifecycle events
    ///
    /// Every event carries its [`SessionId`], so one subscriber can drive the UI
    /// for any number of concurrent sessions without cross-talk.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The message catalog in use
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Request cancellation of one session
    ///
    /// Cooperative: a poll already in flight completes its round trip, but its
    /// result is discarded and the session resolves to
    /// [`JobOutcome::Cancelled`](crate::JobOutcome::Cancelled).
    pub async fn cancel(&self, id: SessionId) -> Result<()> {
        let sessions = self.sessions.active_sessions.lock().await;
        match sessions.get(&id) {
            Some(token) => {
                tracing::debug!(session_id = id.0, "signaling cancellation");
                token.cancel();
                Ok(())
            }
            None => Err(Error::SessionNotFound(id.0)),
        }
    }

    /// Cancel every active session
    ///
    /// The dialog-teardown path: once called, no session will touch its
    /// continuation or emit a terminal event.
    pub async fn cancel_all(&self) {
        let sessions = self.sessions.active_sessions.lock().await;
        for (id, token) in sessions.iter() {
            tracing::debug!(session_id = id.0, "signaling cancellation");
            token.cancel();
        }
    }

    /// Stop accepting new sessions and cancel the active ones
    pub async fn shutdown(&self) {
        tracing::info!("shutting down conversion client");
        self.sessions.accepting_new.store(false, Ordering::SeqCst);
        self.cancel_all().await;
    }

    /// Number of currently active sessions
    pub async fn active_session_count(&self) -> usize {
        self.sessions.active_sessions.lock().await.len()
    }

    pub(crate) fn next_session_id(&self) -> SessionId {
        SessionId::new(self.sessions.next_session_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub(crate) fn emit(&self, event: Event) {
        // A send error only means there are no subscribers
        let _ = self.event_tx.send(event);
    }
}
