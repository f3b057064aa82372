use thiserror::Error;

/// Playlist URL validation failures. Recoverable: the caller re-prompts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid URL format: {0}")]
    MalformedUrl(String),

    #[error("No matching music service found for host: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid URL structure: expected 2 path segments, got {0}")]
    InvalidPathShape(usize),

    #[error("Invalid URL path for the selected service: {0}")]
    InvalidPathPrefix(String),

    #[error("Invalid playlist ID format: {0}")]
    InvalidIdFormat(String),
}

#[derive(Error, Debug)]
pub enum UniqlistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Analysis service rejected the playlist: {0}")]
    SubmissionRejected(String),

    #[error("Analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Analysis service does not recognize task: {0}")]
    UnknownTask(String),

    #[error("Analysis result not ready for task: {0}")]
    ResultNotReady(String),

    #[error("Analysis failed server-side for task: {0}")]
    AnalysisFailed(String),

    #[error("No phrase bucket covers value: {0}")]
    NoMatchingBucket(f64),

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("Invalid service base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Analysis cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, UniqlistError>;
