use crate::state::{sort_ids_numeric, ListingId, PersistedState, Snapshot};

/// The outcome of comparing a fresh snapshot against the stored state.
/// Derived every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReport {
    pub is_baseline: bool,
    pub count_changed: Option<(u64, u64)>,
    pub added: Vec<ListingId>,
    pub removed: Vec<ListingId>,
}

impl ChangeReport {
    /// True when an update run found anything worth notifying about.
    pub fn has_changes(&self) -> bool {
        self.count_changed.is_some() || !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Pure reconciliation: classifies the run and computes the delta.
///
/// The first run for a given record is the baseline: nothing is compared,
/// the snapshot simply becomes the stored state. Every later run diffs the
/// id sets and the displayed count. The returned state is always built from
/// the snapshot, whether or not anything changed.
pub fn reconcile(snapshot: &Snapshot, prior: &PersistedState) -> (ChangeReport, PersistedState) {
    let next = PersistedState::from_snapshot(snapshot);

    if !prior.initialized {
        let report = ChangeReport {
            is_baseline: true,
            count_changed: None,
            added: Vec::new(),
            removed: Vec::new(),
        };
        return (report, next);
    }

    let added = sort_ids_numeric(snapshot.ids.difference(&prior.ids).cloned());
    let removed = sort_ids_numeric(prior.ids.difference(&snapshot.ids).cloned());

    // Only a present-to-present change in the displayed count is reported;
    // a count appearing or disappearing is not a count change.
    let count_changed = match (prior.count, snapshot.count) {
        (Some(old), Some(new)) if old != new => Some((old, new)),
        _ => None,
    };

    let report = ChangeReport {
        is_baseline: false,
        count_changed,
        added,
        removed,
    };
    (report, next)
}
