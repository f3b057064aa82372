use crate::core::{PlaylistInfo, TaskStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct StartAnalysisRequest<'a> {
    pub spotify_playlist_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct StartAnalysisResponse {
    pub task_id: String,
    pub info: PlaylistInfo,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: TaskStatus,
}
