//! Scriptable in-memory stand-in for the analysis service.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::core::{AnalysisApi, AnalysisJob, AnalysisResult, PlaylistInfo, PlaylistReference, TaskStatus};
use crate::error::{Result, UniqlistError};
use parking_lot::Mutex;
use tokio::time::Instant;

/// One scripted reply to a status check
pub(crate) enum StatusStep {
    Status(TaskStatus),
    Unavailable,
    Unknown,
    /// Never respond; the check stays in flight forever
    Hang,
}

pub(crate) struct FakeApi {
    steps: Mutex<VecDeque<StatusStep>>,
    score: f64,
    start_calls: AtomicUsize,
    status_calls: AtomicUsize,
    status_times: Mutex<Vec<Instant>>,
    check_duration: Duration,
}

impl FakeApi {
    pub fn with_statuses(steps: impl IntoIterator<Item = StatusStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            score: 0.734,
            start_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            status_times: Mutex::new(Vec::new()),
            check_duration: Duration::ZERO,
        }
    }

    /// Score the result endpoint reports, on the raw 0..=1 scale
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Simulated round-trip time of each status check
    pub fn with_check_duration(mut self, duration: Duration) -> Self {
        self.check_duration = duration;
        self
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Start instants of every status check observed so far
    pub fn status_times(&self) -> Vec<Instant> {
        self.status_times.lock().clone()
    }

    pub fn sample_info() -> PlaylistInfo {
        PlaylistInfo {
            image_url: Some("https://i.scdn.co/image/cover".to_string()),
            name: "Rainy day mix".to_string(),
            owner: "listener".to_string(),
            tracks_count: 42,
            description: "songs for grey mornings".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisApi for FakeApi {
    async fn start_analysis(&self, _reference: &PlaylistReference) -> Result<AnalysisJob> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AnalysisJob::new("task-1".to_string(), FakeApi::sample_info()))
    }

    async fn get_status(&self, task_id: &str) -> Result<TaskStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_times.lock().push(Instant::now());
        if !self.check_duration.is_zero() {
            tokio::time::sleep(self.check_duration).await;
        }

        let step = self.steps.lock().pop_front();
        match step {
            Some(StatusStep::Status(status)) => Ok(status),
            Some(StatusStep::Unavailable) => Err(UniqlistError::ServiceUnavailable(
                "HTTP 500 Internal Server Error".to_string(),
            )),
            Some(StatusStep::Unknown) => Err(UniqlistError::UnknownTask(task_id.to_string())),
            Some(StatusStep::Hang) | None => futures_util::future::pending().await,
        }
    }

    async fn fetch_result(&self, _task_id: &str) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            score: self.score,
            raw: serde_json::json!({ "result": self.score }),
        })
    }
}
