pub mod analysis;
pub mod core;
pub mod error;
pub mod phrase;
pub mod validate;

pub use analysis::{
    AnalysisClient, AnalysisPoller, AnalysisReport, AnalysisSession, POLL_INTERVAL, PollOutcome,
    PollerHandle, PollerState, SessionEvent,
};
pub use core::{
    AnalysisApi, AnalysisJob, AnalysisResult, PlaylistInfo, PlaylistReference, ProviderDescriptor,
    TaskStatus, registry,
};
use error::Result;
pub use error::{UniqlistError, ValidationError};
pub use phrase::{Commentary, PhraseBucket, PhraseClassifier, SCORE_BUCKETS, TRACK_COUNT_BUCKETS};
pub use validate::{UrlValidator, validate};

/// Analyze one playlist URL against an analysis service (one-shot convenience)
pub async fn analyze(service_base_url: &str, playlist_url: &str) -> Result<AnalysisReport> {
    let client = AnalysisClient::new(service_base_url)?;
    AnalysisSession::new(client).run(playlist_url).await
}
