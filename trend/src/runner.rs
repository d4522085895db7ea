use crate::analysis::{Analysis, Outcome};
use crate::handler::CompletionHandler;
use crate::record::DbRecord;
use anyhow::{Result, bail};
use std::sync::Arc;
use tokio::sync::watch;

/// Failure message delivered when the configured dates are reversed.
const DATES_REVERSED_MESSAGE: &str =
    "Analysis did not run since start and end dates are reversed. Please check and try again.";

/// Failure message delivered when there is nothing to analyze.
const NO_DATA_MESSAGE: &str = "There are no results to analyze";

/// Runner that drives a single background analysis run at a time.
///
/// The runner owns the analysis collaborator and the inputs for the next run.
/// `start` launches the analysis on a background task and returns
/// immediately; completion is reported through the registered
/// `CompletionHandler`, and any number of callers may block in
/// `wait_until_idle` until the run has been dispatched.
///
/// The busy flag lives in a watch channel. The background task flips it to
/// false only after the handler call has returned, so a waiter released by
/// the flag change can rely on the notification having already been
/// delivered.
///
/// # Fields
/// * `analysis` - The analysis operation driven by this runner
/// * `records` - Dataset for the next run, set via `configure`
/// * `target` - Output target identifier the analysis reports against
/// * `busy` - Busy flag and waiter wakeup channel in one
pub struct AnalysisRunner {
    analysis: Arc<dyn Analysis>,
    records: Arc<Vec<DbRecord>>,
    target: String,
    busy: watch::Sender<bool>,
}

impl AnalysisRunner {
    /// Creates an idle runner around the given analysis.
    pub fn new(analysis: Arc<dyn Analysis>) -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            analysis,
            records: Arc::new(Vec::new()),
            target: String::new(),
            busy,
        }
    }

    /// Sets the dataset and output target consumed by the next run.
    ///
    /// Plain field assignment, safe to call any time before `start`.
    pub fn configure(&mut self, records: Vec<DbRecord>, target: impl Into<String>) {
        self.records = Arc::new(records);
        self.target = target.into();
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Launches the analysis on a background task and returns immediately.
    ///
    /// The handler and its context move into the task, which dispatches
    /// exactly one of `on_complete` and `on_failure` when the analysis
    /// returns. Fails without side effects when a run is already
    /// outstanding.
    pub fn start<C, H>(&self, handler: Arc<H>, context: C) -> Result<()>
    where
        C: Send + 'static,
        H: CompletionHandler<C> + ?Sized + 'static,
    {
        // Check and set in one step so two racing starts cannot both launch.
        let launched = self.busy.send_if_modified(|running| {
            if *running {
                return false;
            }
            *running = true;
            true
        });
        if !launched {
            bail!("analysis is already running");
        }

        let analysis = Arc::clone(&self.analysis);
        let records = Arc::clone(&self.records);
        let target = self.target.clone();
        let busy = self.busy.clone();
        tokio::spawn(async move {
            Self::execute(analysis, records, target, handler, context, busy).await;
        });
        Ok(())
    }

    /// Blocks the caller until no run is outstanding.
    ///
    /// Returns immediately when the runner is idle. Any number of callers
    /// may wait concurrently; all are released once the outstanding run has
    /// dispatched its notification.
    pub async fn wait_until_idle(&self) {
        let mut busy = self.busy.subscribe();
        // Re-test the flag after every wakeup, a change notification alone
        // is not proof of idleness.
        while *busy.borrow_and_update() {
            tracing::trace!("runner busy, waiting");
            if busy.changed().await.is_err() {
                tracing::warn!("busy flag channel closed while waiting");
                return;
            }
        }
    }

    /// Background execution entry point.
    ///
    /// Runs the analysis, dispatches the matching handler method, and only
    /// then clears the busy flag, releasing every waiter.
    async fn execute<C, H>(
        analysis: Arc<dyn Analysis>,
        records: Arc<Vec<DbRecord>>,
        target: String,
        handler: Arc<H>,
        context: C,
        busy: watch::Sender<bool>,
    ) where
        C: Send + 'static,
        H: CompletionHandler<C> + ?Sized + 'static,
    {
        let outcome = analysis.analyze(&records, &target).await;
        tracing::debug!("analysis returned {:?}", outcome);

        match outcome {
            Outcome::Complete => handler.on_complete(context).await,
            Outcome::DatesReversed => handler.on_failure(DATES_REVERSED_MESSAGE).await,
            Outcome::NoData => handler.on_failure(NO_DATA_MESSAGE).await,
        }

        busy.send_replace(false);
    }
}
