//! Per-session poll loop.
//!
//! Each session drives one job through `Idle → Polling → Done`: submit, and
//! while the server reports the job pending, wait one poll interval and submit
//! again. Responses are processed strictly in submission order because the next
//! submission is only scheduled after the previous response has been handled —
//! a session never has two requests in flight.

use std::time::Instant;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::ConvertClient;
use crate::classify::ClassifiedError;
use crate::error::{Error, Result};
use crate::types::{ConversionRequest, ConversionStatus, ErrorCode, Event, JobOutcome, SessionId};
use crate::validate;

/// Handle to a running conversion session
///
/// Dropping the handle does not cancel the session; call
/// [`cancel`](ConversionHandle::cancel) (or
/// [`ConvertClient::cancel`]) for that.
#[derive(Debug)]
pub struct ConversionHandle {
    id: SessionId,
    cancel_token: CancellationToken,
    join: tokio::task::JoinHandle<JobOutcome>,
}

impl ConversionHandle {
    /// The session's id
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Request cooperative cancellation of this session
    pub fn cancel(&self) {
        tracing::debug!(session_id = self.id.0, "signaling cancellation");
        self.cancel_token.cancel();
    }

    /// Wait for the session's terminal outcome
    ///
    /// Resolves exactly once, with exactly one of the three outcome arms.
    pub async fn wait(self) -> Result<JobOutcome> {
        self.join
            .await
            .map_err(|e| Error::Other(format!("conversion session task failed: {}", e)))
    }
}

impl ConvertClient {
    /// Start a conversion session and return its handle
    ///
    /// Validates the request first: a validation failure is returned immediately,
    /// no session is registered and no event is emitted. On success the session
    /// task polls until the server reports a terminal status, the optional
    /// maximum poll duration elapses, or the session is cancelled.
    pub async fn start(&self, request: ConversionRequest) -> Result<ConversionHandle> {
        if !self
            .sessions
            .accepting_new
            .load(std::sync::atomic::Ordering::SeqCst)
        {
            return Err(Error::ShuttingDown);
        }

        validate::validate_request(&request)?;

        let id = self.next_session_id();
        let cancel_token = CancellationToken::new();

        {
            let mut sessions = self.sessions.active_sessions.lock().await;
            sessions.insert(id, cancel_token.clone());
        }

        tracing::info!(
            session_id = id.0,
            file_name = %request.file_name,
            target_format = %request.target_format,
            "starting conversion session"
        );
        self.emit(Event::ConversionStarted {
            id,
            file_name: request.file_name.clone(),
            target_format: request.target_format.clone(),
        });

        let client = self.clone();
        let token = cancel_token.clone();
        let join = tokio::spawn(async move { client.run_session(id, request, token).await });

        Ok(ConversionHandle {
            id,
            cancel_token,
            join,
        })
    }

    /// Run a conversion to its terminal outcome
    ///
    /// Convenience wrapper: [`start`](ConvertClient::start) followed by
    /// [`ConversionHandle::wait`].
    pub async fn convert(&self, request: ConversionRequest) -> Result<JobOutcome> {
        self.start(request).await?.wait().await
    }

    async fn run_session(
        &self,
        id: SessionId,
        request: ConversionRequest,
        token: CancellationToken,
    ) -> JobOutcome {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        let outcome = loop {
            let result = self.submit_unchecked(&request).await;
            attempt += 1;

            // A round trip that resolves after cancellation is discarded unseen
            if token.is_cancelled() {
                break JobOutcome::Cancelled;
            }

            match result {
                Ok(ConversionStatus::Pending) => {
                    tracing::debug!(session_id = id.0, attempt, "job pending, scheduling next poll");
                    self.emit(Event::ConversionPending { id, attempt });

                    if let Some(max) = self.config.polling.max_poll_duration {
                        if started.elapsed() >= max {
                            tracing::warn!(
                                session_id = id.0,
                                attempt,
                                "maximum poll duration elapsed"
                            );
                            break self.fail(id, self.catalog.classify(&ErrorCode::Timeout));
                        }
                    }

                    tokio::select! {
                        _ = token.cancelled() => break JobOutcome::Cancelled,
                        _ = tokio::time::sleep(self.config.polling.poll_interval) => {}
                    }
                }
                Ok(ConversionStatus::Completed { file_url }) => {
                    tracing::info!(session_id = id.0, attempt, file_url = %file_url, "conversion completed");
                    self.emit(Event::ConversionCompleted {
                        id,
                        file_url: file_url.clone(),
                        at: Utc::now(),
                    });
                    break JobOutcome::Completed { file_url };
                }
                Ok(ConversionStatus::Failed { code }) => {
                    tracing::warn!(session_id = id.0, attempt, code = %code, "service failed the job");
                    break self.fail(id, self.catalog.classify(&code));
                }
                Err(Error::Transport(transport)) => {
                    tracing::warn!(session_id = id.0, attempt, error = %transport, "transport failure");
                    break self.fail(id, self.catalog.classify_transport(&transport));
                }
                Err(error) => {
                    // Network and decode failures render the generic message
                    tracing::error!(session_id = id.0, attempt, error = %error, "poll failed");
                    break self.fail(
                        id,
                        ClassifiedError {
                            code: None,
                            message: self.catalog.render(crate::classify::MessageKey::Unknown),
                            service_reported: false,
                        },
                    );
                }
            }
        };

        if matches!(outcome, JobOutcome::Cancelled) {
            tracing::info!(session_id = id.0, "conversion session cancelled");
            self.emit(Event::ConversionCancelled { id, at: Utc::now() });
        }

        let mut sessions = self.sessions.active_sessions.lock().await;
        sessions.remove(&id);

        outcome
    }

    fn fail(&self, id: SessionId, classified: ClassifiedError) -> JobOutcome {
        self.emit(Event::ConversionFailed {
            id,
            message: classified.message.clone(),
            at: Utc::now(),
        });
        JobOutcome::Failed(classified)
    }
}
