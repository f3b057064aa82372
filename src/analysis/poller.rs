use std::sync::Arc;
use std::time::Duration;

use crate::core::{AnalysisApi, TaskStatus};
use crate::error::{Result, UniqlistError};
use parking_lot::Mutex;
use strum_macros::Display;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Contract cadence between status checks
pub const POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Poller lifecycle states
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
    Resolved,
    Failed,
    Cancelled,
}

/// How a polling run ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Resolved,
    Cancelled,
}

/// Drives repeated status checks for one task until a terminal state.
///
/// Checks run sequentially on the caller's task: a new check is never
/// issued before the previous response has been observed. The interval is
/// measured from the end of one check to the start of the next, keeping
/// server load proportional to actual round-trip time; the first check
/// fires one full interval after [`AnalysisPoller::run`] starts.
pub struct AnalysisPoller<A: AnalysisApi> {
    api: Arc<A>,
    interval: Duration,
    cancel: CancellationToken,
    state: Arc<Mutex<PollerState>>,
}

/// Cancellation and inspection handle, cloneable across tasks
#[derive(Clone)]
pub struct PollerHandle {
    cancel: CancellationToken,
    state: Arc<Mutex<PollerState>>,
}

impl PollerHandle {
    /// Stop polling. Effective from `Polling` only; once cancel returns, no
    /// further status check is issued and a check still in flight is
    /// discarded without being delivered.
    pub fn cancel(&self) {
        if *self.state.lock() == PollerState::Polling {
            self.cancel.cancel();
        }
    }

    pub fn state(&self) -> PollerState {
        *self.state.lock()
    }
}

impl<A: AnalysisApi> AnalysisPoller<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_interval(api, POLL_INTERVAL)
    }

    pub fn with_interval(api: Arc<A>, interval: Duration) -> Self {
        Self {
            api,
            interval,
            cancel: CancellationToken::new(),
            state: Arc::new(Mutex::new(PollerState::Idle)),
        }
    }

    /// Replace the cancellation token, e.g. with a child of a session token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            cancel: self.cancel.clone(),
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> PollerState {
        *self.state.lock()
    }

    fn set_state(&self, state: PollerState) {
        *self.state.lock() = state;
    }

    /// Poll until the task reaches a terminal state, fails, or is cancelled.
    ///
    /// Consuming `self` makes the poller single-use. A `Failed` status and
    /// any error from a single check are both fatal to the loop; checks are
    /// never retried.
    pub async fn run(self, task_id: &str) -> Result<PollOutcome> {
        self.set_state(PollerState::Polling);
        debug!("polling analysis task {}", task_id);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    self.set_state(PollerState::Cancelled);
                    debug!("polling cancelled for task {}", task_id);
                    return Ok(PollOutcome::Cancelled);
                }
                _ = tokio::time::sleep(self.interval) => {}
            }

            // A late response is dropped here together with its future
            let status = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    self.set_state(PollerState::Cancelled);
                    debug!("polling cancelled mid-check for task {}", task_id);
                    return Ok(PollOutcome::Cancelled);
                }
                checked = self.api.get_status(task_id) => match checked {
                    Ok(status) => status,
                    Err(e) => {
                        self.set_state(PollerState::Failed);
                        return Err(e);
                    }
                }
            };

            match status {
                TaskStatus::Succeeded => {
                    self.set_state(PollerState::Resolved);
                    debug!("task {} resolved", task_id);
                    return Ok(PollOutcome::Resolved);
                }
                TaskStatus::Failed => {
                    self.set_state(PollerState::Failed);
                    return Err(UniqlistError::AnalysisFailed(task_id.to_string()));
                }
                status => {
                    debug!("task {} still {}", task_id, status);
                }
            }
        }
    }
}
