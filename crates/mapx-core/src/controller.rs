//! Request lifecycle for a single query at a time.
//!
//! [`QueryState`] owns every transition as a plain synchronous method so the
//! invariants can be tested without a runtime. [`QueryController`] drives it
//! against a [`GroundingBackend`], holding the state lock only across those
//! synchronous transitions and never across the backend call.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::watch;

use crate::error::{BackendError, ValidationError};
use crate::location::LocationState;
use crate::types::{Coordinates, QueryResult};

pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred.";

const CANCELLED_CAUSE: &str = "query was cancelled";

/// A grounding service that answers a prompt with text and citations.
///
/// Implementations must classify their raw response into [`QueryResult`]
/// and report every failure as a [`BackendError`].
pub trait GroundingBackend: Send + Sync {
    fn query(
        &self,
        prompt: &str,
        location: Option<Coordinates>,
    ) -> impl Future<Output = Result<QueryResult, BackendError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("a query is already in flight")]
    Busy,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    prompt_text: String,
    is_loading: bool,
    error_message: Option<String>,
    result: Option<QueryResult>,
    notice: Option<String>,
}

impl QueryState {
    #[must_use]
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    /// Inline validation message from the last rejected submission.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Submitting
        } else if self.result.is_some() {
            Phase::Success
        } else if self.error_message.is_some() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    /// Whether the submit control should be enabled for `prompt`.
    #[must_use]
    pub fn can_submit(&self, prompt: &str) -> bool {
        !self.is_loading && !prompt.trim().is_empty()
    }

    /// Enters `Submitting`, clearing the previous error and result.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejected::Busy`] while a query is in flight and
    /// [`SubmitRejected::Invalid`] for a blank prompt. Neither changes the
    /// phase; a blank prompt only records the inline notice.
    pub fn begin_submit(&mut self, prompt: &str) -> Result<(), SubmitRejected> {
        if self.is_loading {
            return Err(SubmitRejected::Busy);
        }
        if prompt.trim().is_empty() {
            let err = ValidationError::EmptyPrompt;
            self.notice = Some(err.to_string());
            return Err(err.into());
        }

        prompt.clone_into(&mut self.prompt_text);
        self.is_loading = true;
        self.error_message = None;
        self.result = None;
        self.notice = None;
        Ok(())
    }

    /// `Submitting -> Success`. Ignored in any other phase.
    pub fn resolve(&mut self, result: QueryResult) -> bool {
        if !self.is_loading {
            return false;
        }
        self.is_loading = false;
        self.result = Some(result);
        true
    }

    /// `Submitting -> Failed`. Ignored in any other phase.
    pub fn reject(&mut self, cause: impl fmt::Display) -> bool {
        if !self.is_loading {
            return false;
        }
        let message = cause.to_string();
        self.is_loading = false;
        self.error_message = Some(if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        });
        true
    }
}

pub struct QueryController<B> {
    backend: B,
    state: Mutex<QueryState>,
    location: watch::Receiver<LocationState>,
}

impl<B: GroundingBackend> QueryController<B> {
    pub fn new(backend: B, location: watch::Receiver<LocationState>) -> Self {
        Self {
            backend,
            state: Mutex::new(QueryState::default()),
            location,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState {
        self.lock().clone()
    }

    /// Runs one query to completion and returns the resulting phase.
    ///
    /// Uses whatever coordinates are known at the moment of submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejected`] without contacting the backend when the
    /// prompt is blank or another query is still in flight.
    pub async fn submit(&self, prompt: &str) -> Result<Phase, SubmitRejected> {
        {
            let mut state = self.lock();
            state.begin_submit(prompt)?;
        }
        let in_flight = InFlight {
            state: &self.state,
            armed: true,
        };

        let location = self.location.borrow().coordinates();
        tracing::debug!(
            prompt_len = prompt.len(),
            location_bias = location.is_some(),
            "submitting grounding query"
        );

        let outcome = self.backend.query(prompt, location).await;
        in_flight.disarm();

        let mut state = self.lock();
        match outcome {
            Ok(result) => {
                tracing::info!(
                    citations = result.citations.len(),
                    "grounding query succeeded"
                );
                state.resolve(result);
            }
            Err(err) => {
                tracing::debug!(error = %err, "grounding query failed");
                state.reject(&err);
            }
        }
        Ok(state.phase())
    }

    fn lock(&self) -> MutexGuard<'_, QueryState> {
        lock_state(&self.state)
    }
}

/// Fails the in-flight query if the submit future is dropped before the
/// backend answers, so the controller never stays stuck in `Submitting`.
struct InFlight<'a> {
    state: &'a Mutex<QueryState>,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("grounding query abandoned before completion");
            lock_state(self.state).reject(BackendError::wrap(CANCELLED_CAUSE));
        }
    }
}

fn lock_state(state: &Mutex<QueryState>) -> MutexGuard<'_, QueryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
