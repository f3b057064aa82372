use std::time::Duration;

use crate::analysis::types::{StartAnalysisRequest, StartAnalysisResponse, StatusResponse};
use crate::core::{AnalysisApi, AnalysisJob, AnalysisResult, PlaylistReference, TaskStatus};
use crate::error::{Result, UniqlistError};
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("uniqlist/", env!("CARGO_PKG_VERSION"));

/// HTTP wrapper over the analysis service.
///
/// Every operation issues exactly one outbound request; the poller owns
/// scheduling and never this layer.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Build a client against a service base URL such as `http://localhost:8000`
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| UniqlistError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Transport failures surface as service unavailability
fn transport_error(e: reqwest::Error) -> UniqlistError {
    UniqlistError::ServiceUnavailable(e.to_string())
}

fn decode_error(e: reqwest::Error) -> UniqlistError {
    UniqlistError::InvalidResponse(e.to_string())
}

#[async_trait::async_trait]
impl AnalysisApi for AnalysisClient {
    async fn start_analysis(&self, reference: &PlaylistReference) -> Result<AnalysisJob> {
        let url = format!("{}/analysis/start", self.base_url);
        debug!(
            "submitting {} playlist {} for analysis",
            reference.provider().name,
            reference.external_id()
        );

        let response = self
            .http
            .post(&url)
            .json(&StartAnalysisRequest {
                spotify_playlist_id: reference.external_id(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_server_error() {
            return Err(UniqlistError::ServiceUnavailable(format!(
                "HTTP {status} from {url}"
            )));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(UniqlistError::SubmissionRejected(if detail.is_empty() {
                format!("HTTP {status}")
            } else {
                detail
            }));
        }

        let body: StartAnalysisResponse = response.json().await.map_err(decode_error)?;
        debug!("analysis task {} started", body.task_id);
        Ok(AnalysisJob::new(body.task_id, body.info))
    }

    async fn get_status(&self, task_id: &str) -> Result<TaskStatus> {
        let url = format!("{}/analysis/status", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("task_id", task_id)])
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(UniqlistError::UnknownTask(task_id.to_string())),
            status if !status.is_success() => Err(UniqlistError::ServiceUnavailable(format!(
                "HTTP {status} from {url}"
            ))),
            _ => {
                let body: StatusResponse = response.json().await.map_err(decode_error)?;
                debug!("task {} status: {}", task_id, body.status);
                Ok(body.status)
            }
        }
    }

    async fn fetch_result(&self, task_id: &str) -> Result<AnalysisResult> {
        let url = format!("{}/analysis/result", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("task_id", task_id)])
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::BAD_REQUEST => Err(UniqlistError::ResultNotReady(task_id.to_string())),
            StatusCode::NOT_FOUND => Err(UniqlistError::UnknownTask(task_id.to_string())),
            status if !status.is_success() => Err(UniqlistError::ServiceUnavailable(format!(
                "HTTP {status} from {url}"
            ))),
            _ => {
                let raw: serde_json::Value = response.json().await.map_err(decode_error)?;
                let score = raw
                    .get("result")
                    .and_then(|v| v.as_f64())
                    .ok_or_else(|| {
                        UniqlistError::InvalidResponse(
                            "missing numeric `result` field".to_string(),
                        )
                    })?;
                Ok(AnalysisResult { score, raw })
            }
        }
    }
}
