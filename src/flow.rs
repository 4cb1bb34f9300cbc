//! Observable state for one submit-and-wait interaction.
//!
//! A [`FlowController`] runs at most one operation at a time and publishes every
//! transition on a `watch` channel:
//!
//! ```text
//! Idle --submit--> Submitting --ok--> Success(T) --acknowledge--> Idle
//!                       |     --err-> Failed     --acknowledge--> Idle
//!                       +--cancel--> Idle
//! ```
//!
//! Submitting from any state other than `Idle` is rejected without running the
//! operation. A cancelled operation never publishes its result, and dropping a
//! `submit` future before it finishes puts the flow back to `Idle`.

use crate::error::app_error::{AppError, ErrorKind};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState<T> {
    Idle,
    Submitting,
    Success(T),
    Failed(FlowFailure),
}

impl<T> FlowState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FlowState::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FlowState::Submitting)
    }
}

/// What a failed flow shows the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowFailure {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
}

impl From<&AppError> for FlowFailure {
    fn from(error: &AppError) -> Self {
        Self {
            kind: error.kind(),
            title: error.title().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The operation ran and its result was published.
    Completed,
    /// Another submission was in progress or its result not yet acknowledged.
    Rejected,
    /// `cancel` was called before the operation finished.
    Cancelled,
}

impl SubmitOutcome {
    pub fn ensure_completed(self) -> Result<(), AppError> {
        match self {
            SubmitOutcome::Completed => Ok(()),
            SubmitOutcome::Rejected => Err(AppError::Busy),
            SubmitOutcome::Cancelled => Err(AppError::Cancelled),
        }
    }
}

struct InFlight {
    id: u64,
    token: CancellationToken,
}

pub struct FlowController<T> {
    state: watch::Sender<FlowState<T>>,
    in_flight: Mutex<Option<InFlight>>,
    next_id: AtomicU64,
}

/// Returns the flow to `Idle` if a `submit` future is dropped while its
/// operation is still the one in flight.
struct SubmitGuard<'a, T> {
    flow: &'a FlowController<T>,
    id: u64,
}

impl<T> Drop for SubmitGuard<'_, T> {
    fn drop(&mut self) {
        let mut in_flight = self.flow.lock_in_flight();
        if in_flight.as_ref().map(|current| current.id) == Some(self.id) {
            *in_flight = None;
            self.flow.state.send_replace(FlowState::Idle);
            debug!("Submission dropped before completion, flow reset");
        }
    }
}

impl<T> Default for FlowController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FlowController<T> {
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(FlowState::Idle),
            in_flight: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `operation` if the flow is idle and publishes its result. The future
    /// is dropped unpolled when the submission is rejected.
    pub async fn submit<F>(&self, operation: F) -> SubmitOutcome
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let (id, token) = {
            let mut in_flight = self.lock_in_flight();
            let accepted = self.state.send_if_modified(|state| {
                if state.is_idle() {
                    *state = FlowState::Submitting;
                    true
                } else {
                    false
                }
            });
            if !accepted {
                debug!("Submission rejected, flow is not idle");
                return SubmitOutcome::Rejected;
            }

            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let token = CancellationToken::new();
            *in_flight = Some(InFlight { id, token: token.clone() });
            (id, token)
        };
        let _guard = SubmitGuard { flow: self, id };

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return SubmitOutcome::Cancelled,
            result = operation => result,
        };

        if self.finish(id, result) {
            SubmitOutcome::Completed
        } else {
            SubmitOutcome::Cancelled
        }
    }

    /// Publishes `result` only if submission `id` is still the one in flight.
    /// Clearing `in_flight` here leaves the submit guard nothing to undo.
    fn finish(&self, id: u64, result: Result<T, AppError>) -> bool {
        let mut in_flight = self.lock_in_flight();
        if in_flight.as_ref().map(|current| current.id) != Some(id) {
            return false;
        }
        *in_flight = None;

        let next = match result {
            Ok(value) => FlowState::Success(value),
            Err(e) => {
                let failure = FlowFailure::from(&e);
                warn!(kind = ?failure.kind, error = %e, "Flow failed");
                FlowState::Failed(failure)
            }
        };
        self.state.send_replace(next);
        true
    }

    /// Abandons the in-flight operation and returns to `Idle`. Returns whether
    /// anything was cancelled.
    pub fn cancel(&self) -> bool {
        let mut in_flight = self.lock_in_flight();
        let Some(current) = in_flight.take() else {
            return false;
        };
        current.token.cancel();
        self.state.send_replace(FlowState::Idle);
        debug!("Flow cancelled");
        true
    }

    /// Dismisses a `Success` or `Failed` result. Returns whether the state changed.
    pub fn acknowledge(&self) -> bool {
        let _in_flight = self.lock_in_flight();
        self.state.send_if_modified(|state| match state {
            FlowState::Success(_) | FlowState::Failed(_) => {
                *state = FlowState::Idle;
                true
            }
            FlowState::Idle | FlowState::Submitting => false,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone> FlowController<T> {
    pub fn state(&self) -> FlowState<T> {
        self.state.borrow().clone()
    }
}
