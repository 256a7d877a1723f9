use monitor_core::{reconcile, render_baseline, render_update, RenderSettings, Snapshot};
use monitor_logging::monitor_info;
use thiserror::Error;

use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::notify::{Notifier, NotifyError};
use crate::state_store::{StateError, StateStore};
use crate::types::FetchError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("state store failure: {0}")]
    State(#[from] StateError),
    /// The state was already saved when this surfaces; the next run will
    /// compare against the snapshot that triggered the failed message.
    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),
}

/// What a completed run did, for logging and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub baseline: bool,
    pub notified: bool,
    pub added: usize,
    pub removed: usize,
}

/// Executes one full monitoring pass: fetch, extract, reconcile, persist,
/// then notify when the report warrants it.
///
/// The new state is saved exactly once, before any notification attempt,
/// so a delivery failure never loses the snapshot. A fetch or load failure
/// aborts before any state mutation.
pub async fn run_once(
    source_url: &str,
    observed_at_epoch: i64,
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    store: &dyn StateStore,
    notifier: &dyn Notifier,
    render: &RenderSettings,
) -> Result<RunOutcome, RunError> {
    let html = fetcher.fetch(source_url).await?;
    let extraction = extractor.extract(&html);
    let snapshot = Snapshot {
        ids: extraction.ids,
        count: extraction.count,
        observed_at_epoch,
    };
    monitor_info!(
        "Observed {} listing id(s), displayed count {:?}",
        snapshot.ids.len(),
        snapshot.count
    );

    let prior = store.load()?;
    let (report, next) = reconcile(&snapshot, &prior);
    store.save(&next)?;

    // Baseline runs always confirm; update runs only speak when the
    // report is non-empty.
    let message = if report.is_baseline {
        Some(render_baseline(&snapshot))
    } else {
        render_update(&report, render)
    };

    let outcome = RunOutcome {
        baseline: report.is_baseline,
        notified: message.is_some(),
        added: report.added.len(),
        removed: report.removed.len(),
    };

    if let Some(text) = message {
        notifier.notify(&text).await?;
        monitor_info!(
            "Notification sent ({} run, +{} -{})",
            if outcome.baseline { "baseline" } else { "update" },
            outcome.added,
            outcome.removed
        );
    } else {
        monitor_info!("No change, nothing to report");
    }

    Ok(outcome)
}
