pub mod client;
pub mod poller;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use client::AnalysisClient;
pub use poller::{AnalysisPoller, POLL_INTERVAL, PollOutcome, PollerHandle, PollerState};
pub use session::{AnalysisReport, AnalysisSession, SessionEvent};
