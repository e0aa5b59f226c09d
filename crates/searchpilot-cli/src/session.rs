use crate::client::{FetchError, ReportSource};
use searchpilot_core::{AnalysisRequest, Report, Strategy};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Outcome of one fetch started by a session
#[derive(Debug)]
pub struct ReportEvent {
    pub generation: u64,
    pub request: AnalysisRequest,
    pub outcome: Result<Report, FetchError>,
}

struct InFlight {
    cancel: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

/// Interactive (url, strategy) selection that re-fetches on every change.
///
/// Starting a fetch cancels the one in flight, and events from a superseded
/// generation are reported as stale by [`ReportSession::is_current`].
pub struct ReportSession {
    source: Arc<dyn ReportSource>,
    events: mpsc::UnboundedSender<ReportEvent>,
    url: Option<String>,
    strategy: Strategy,
    generation: u64,
    /// The latest fetch finished with an error
    last_failed: bool,
    in_flight: Option<InFlight>,
}

impl ReportSession {
    pub fn new(
        source: Arc<dyn ReportSource>,
        strategy: Strategy,
    ) -> (Self, mpsc::UnboundedReceiver<ReportEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            source,
            events,
            url: None,
            strategy,
            generation: 0,
            last_failed: false,
            in_flight: None,
        };
        (session, rx)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Current selection, if a URL has been set
    pub fn current(&self) -> Option<AnalysisRequest> {
        let url = self.url.as_ref()?;
        AnalysisRequest::new(url.as_str(), self.strategy).ok()
    }

    /// Change the target URL; returns the request started, if any.
    /// The same URL is fetched again only after a failed fetch.
    pub fn set_url(&mut self, url: &str) -> searchpilot_core::Result<Option<AnalysisRequest>> {
        let request = AnalysisRequest::new(url, self.strategy)?;
        if self.url.as_deref() == Some(request.url()) && !self.last_failed {
            return Ok(None);
        }
        self.url = Some(request.url().to_string());
        Ok(Some(self.start(request)))
    }

    /// Change the strategy; returns the request started, if any
    pub fn set_strategy(&mut self, strategy: Strategy) -> Option<AnalysisRequest> {
        if self.strategy == strategy {
            return None;
        }
        self.strategy = strategy;
        let request = self.current()?;
        Some(self.start(request))
    }

    pub fn toggle_strategy(&mut self) -> Option<AnalysisRequest> {
        self.set_strategy(self.strategy.toggle())
    }

    /// Fetch the current selection again
    pub fn refresh(&mut self) -> Option<AnalysisRequest> {
        let request = self.current()?;
        Some(self.start(request))
    }

    /// Whether an event belongs to the latest fetch
    pub fn is_current(&self, event: &ReportEvent) -> bool {
        event.generation == self.generation
    }

    /// Take in an event from the channel; false when it is stale
    pub fn accept(&mut self, event: &ReportEvent) -> bool {
        if !self.is_current(event) {
            return false;
        }
        self.last_failed = event.outcome.is_err();
        true
    }

    /// Cancel the fetch in flight, if any
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if !in_flight.task.is_finished() {
                tracing::debug!("Cancelling superseded fetch (generation {})", self.generation);
            }
            let _ = in_flight.cancel.send(());
        }
    }

    fn start(&mut self, request: AnalysisRequest) -> AnalysisRequest {
        self.cancel();
        self.generation += 1;
        self.last_failed = false;

        let generation = self.generation;
        let (cancel, mut cancel_rx) = broadcast::channel(1);
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let task_request = request.clone();

        tracing::debug!(
            "Starting fetch {} for {} ({})",
            generation,
            request.url(),
            request.strategy()
        );

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                outcome = source.fetch_report(&task_request) => outcome,
                _ = cancel_rx.recv() => {
                    tracing::debug!("Fetch {} cancelled", generation);
                    return;
                }
            };

            let _ = events.send(ReportEvent {
                generation,
                request: task_request,
                outcome,
            });
        });

        self.in_flight = Some(InFlight { cancel, task });
        request
    }
}

impl Drop for ReportSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
