use std::sync::LazyLock;

use crate::error::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Supported playlist provider, one registry entry per service
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    pub name: &'static str,
    pub host: &'static str,
    pub path_prefix: &'static str,
    pub id_pattern: Regex,
}

static PROVIDERS: LazyLock<Vec<ProviderDescriptor>> = LazyLock::new(|| {
    vec![ProviderDescriptor {
        name: "Spotify",
        host: "open.spotify.com",
        path_prefix: "playlist",
        // base62, fixed length
        id_pattern: Regex::new(r"^[0-9A-Za-z]{22}$").expect("invalid Spotify id pattern"),
    }]
    // Soundcloud and yandex music will be supported later
});

/// Built-in provider registry, loaded once on first use
pub fn registry() -> &'static [ProviderDescriptor] {
    &PROVIDERS
}

/// A provider-qualified playlist, produced by URL validation.
/// Constructed only by [`crate::validate::UrlValidator`].
#[derive(Debug, Clone)]
pub struct PlaylistReference {
    provider: ProviderDescriptor,
    external_id: String,
}

impl PlaylistReference {
    pub(crate) fn new(provider: ProviderDescriptor, external_id: String) -> Self {
        Self {
            provider,
            external_id,
        }
    }

    pub fn provider(&self) -> &ProviderDescriptor {
        &self.provider
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }
}

/// Server-side task status
#[derive(Display, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "SUCCESS")]
    Succeeded,
    #[serde(rename = "FAILURE")]
    Failed,
}

impl TaskStatus {
    /// A terminal status admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Succeeded | TaskStatus::Failed)
    }
}

/// Playlist metadata returned when an analysis is started
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub name: String,
    pub owner: String,
    pub tracks_count: u32,
    pub description: String,
}

/// One server-side analysis run identified by an opaque id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    pub task_id: String,
    pub status: TaskStatus,
    pub info: PlaylistInfo,
    pub created_at: DateTime<Utc>,
}

impl AnalysisJob {
    /// Create a new job handle as returned by the start endpoint
    pub fn new(task_id: String, info: PlaylistInfo) -> Self {
        Self {
            task_id,
            status: TaskStatus::Pending,
            info,
            created_at: Utc::now(),
        }
    }

    /// Record a status transition observed via polling
    pub fn observe(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

/// Uniqueness score as fetched from the service, on a 0..=1 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub raw: serde_json::Value,
}

impl AnalysisResult {
    /// Score on the display scale (0..=100)
    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }
}

/// Trait over the analysis service operations
///
/// Each call is a single outbound request; retry and scheduling policy
/// live in [`crate::analysis::AnalysisPoller`].
#[async_trait::async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Submit a playlist for analysis, returning the job handle
    async fn start_analysis(&self, reference: &PlaylistReference) -> Result<AnalysisJob>;

    /// Fetch the current status of a running task
    async fn get_status(&self, task_id: &str) -> Result<TaskStatus>;

    /// Fetch the result of a task that reached a terminal status
    async fn fetch_result(&self, task_id: &str) -> Result<AnalysisResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(TaskStatus::Succeeded.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
    }

    #[test]
    fn registry_has_spotify() {
        let spotify = registry()
            .iter()
            .find(|p| p.name == "Spotify")
            .expect("Spotify registered");
        assert_eq!(spotify.host, "open.spotify.com");
        assert_eq!(spotify.path_prefix, "playlist");
        assert!(spotify.id_pattern.is_match("37i9dQZF1DXcBWIGoYBM5M"));
        assert!(!spotify.id_pattern.is_match("too-short"));
    }
}
