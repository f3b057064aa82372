use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use crate::analysis::client::AnalysisClient;
use crate::analysis::poller::{AnalysisPoller, POLL_INTERVAL, PollOutcome};
use crate::core::{
    AnalysisApi, AnalysisJob, AnalysisResult, PlaylistReference, ProviderDescriptor, TaskStatus,
    registry,
};
use crate::error::{Result, UniqlistError};
use crate::phrase::{Commentary, PhraseBucket, PhraseClassifier, SCORE_BUCKETS};
use crate::validate::UrlValidator;
use futures_util::{Stream, StreamExt, stream};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lifecycle of one playlist submission
#[derive(Debug)]
pub enum SessionEvent {
    Validating,
    Submitting(PlaylistReference),
    Polling(AnalysisJob),
    Ready(AnalysisReport),
    Errored(UniqlistError),
}

/// The resolved display tuple for one analyzed playlist
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub job: AnalysisJob,
    pub result: AnalysisResult,
    /// Score on the display scale, rounded to two decimals
    pub score: f64,
    /// Score rendered to two decimal places, e.g. `"73.40"`
    pub display: String,
    /// The rendered score truncated to an integer, for counters
    pub percent: u32,
    pub phrase: String,
    pub style: String,
}

impl AnalysisReport {
    fn new(job: AnalysisJob, result: AnalysisResult, commentary: Commentary) -> Self {
        let score = (result.percent() * 100.0).round() / 100.0;
        Self {
            display: format!("{score:.2}"),
            percent: score.trunc() as u32,
            phrase: commentary.phrase.to_string(),
            style: commentary.style.to_string(),
            score,
            job,
            result,
        }
    }
}

/// Takes a raw playlist URL through validation, submission and polling to a
/// resolved score with commentary.
///
/// Single-use: [`AnalysisSession::events`] and [`AnalysisSession::run`]
/// consume the session; a new submission creates a new session.
pub struct AnalysisSession<A: AnalysisApi> {
    api: Arc<A>,
    providers: &'static [ProviderDescriptor],
    buckets: &'static [PhraseBucket],
    interval: Duration,
    cancel: CancellationToken,
    rng: StdRng,
}

impl AnalysisSession<AnalysisClient> {
    pub fn new(client: AnalysisClient) -> Self {
        Self::with_api(Arc::new(client))
    }
}

impl<A: AnalysisApi> AnalysisSession<A> {
    pub fn with_api(api: Arc<A>) -> Self {
        Self {
            api,
            providers: registry(),
            buckets: SCORE_BUCKETS,
            interval: POLL_INTERVAL,
            cancel: CancellationToken::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Inject the random source used for phrase selection
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Token that cancels the polling phase of this session
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Lazy stream of lifecycle events; each stage runs only when the next
    /// event is demanded. Ends after `Ready`/`Errored`, or without either
    /// when the session is cancelled mid-poll.
    pub fn events(self, url: String) -> impl Stream<Item = SessionEvent> {
        stream::unfold(Step::Announce { url, session: self }, |step| async move {
            match step {
                Step::Announce { url, session } => {
                    debug!("validating playlist URL");
                    Some((SessionEvent::Validating, Step::Validate { url, session }))
                }
                Step::Validate { url, session } => {
                    match UrlValidator::new(session.providers).validate(&url) {
                        Ok(reference) => {
                            debug!(
                                "validated {} playlist {}",
                                reference.provider().name,
                                reference.external_id()
                            );
                            Some((
                                SessionEvent::Submitting(reference.clone()),
                                Step::Submit { reference, session },
                            ))
                        }
                        Err(e) => Some((SessionEvent::Errored(e.into()), Step::Done)),
                    }
                }
                Step::Submit { reference, session } => {
                    match session.api.start_analysis(&reference).await {
                        Ok(job) => Some((
                            SessionEvent::Polling(job.clone()),
                            Step::Poll { job, session },
                        )),
                        Err(e) => Some((SessionEvent::Errored(e), Step::Done)),
                    }
                }
                Step::Poll { mut job, mut session } => {
                    let poller =
                        AnalysisPoller::with_interval(Arc::clone(&session.api), session.interval)
                            .with_cancellation(session.cancel.child_token());
                    match poller.run(&job.task_id).await {
                        Ok(PollOutcome::Resolved) => {
                            job.observe(TaskStatus::Succeeded);
                            let event = resolve(&mut session, job).await;
                            Some((event, Step::Done))
                        }
                        // No further signals after cancellation
                        Ok(PollOutcome::Cancelled) => None,
                        Err(e) => Some((SessionEvent::Errored(e), Step::Done)),
                    }
                }
                Step::Done => None,
            }
        })
    }

    /// Drive the session to completion and return the final report
    pub async fn run(self, url: &str) -> Result<AnalysisReport> {
        let mut events = pin!(self.events(url.to_string()));
        while let Some(event) = events.next().await {
            match event {
                SessionEvent::Ready(report) => return Ok(report),
                SessionEvent::Errored(e) => return Err(e),
                _ => {}
            }
        }
        Err(UniqlistError::Cancelled)
    }
}

/// Fetch the result of a resolved job and classify it for display
async fn resolve<A: AnalysisApi>(
    session: &mut AnalysisSession<A>,
    job: AnalysisJob,
) -> SessionEvent {
    let result = match session.api.fetch_result(&job.task_id).await {
        Ok(result) => result,
        Err(e) => return SessionEvent::Errored(e),
    };
    let classifier = PhraseClassifier::new(session.buckets);
    match classifier.classify(result.percent(), &mut session.rng) {
        Ok(commentary) => SessionEvent::Ready(AnalysisReport::new(job, result, commentary)),
        Err(e) => SessionEvent::Errored(e),
    }
}

enum Step<A: AnalysisApi> {
    Announce {
        url: String,
        session: AnalysisSession<A>,
    },
    Validate {
        url: String,
        session: AnalysisSession<A>,
    },
    Submit {
        reference: PlaylistReference,
        session: AnalysisSession<A>,
    },
    Poll {
        job: AnalysisJob,
        session: AnalysisSession<A>,
    },
    Done,
}
