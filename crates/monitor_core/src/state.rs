use std::cmp::Ordering;
use std::collections::HashSet;

/// Opaque token naming one listing on the remote page. The observed domain
/// emits digit strings; only equality is assumed, ordering is cosmetic.
pub type ListingId = String;

/// One observation of the remote listing page at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub ids: HashSet<ListingId>,
    pub count: Option<u64>,
    pub observed_at_epoch: i64,
}

impl Snapshot {
    /// The total to display for this snapshot: the page's own count when it
    /// showed one, otherwise the number of distinct ids found.
    pub fn display_total(&self) -> u64 {
        self.count.unwrap_or(self.ids.len() as u64)
    }
}

/// The durable record of the last reconciled snapshot.
///
/// `initialized == false` only ever holds before the first successful run;
/// once set it never reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub initialized: bool,
    pub ids: HashSet<ListingId>,
    pub count: Option<u64>,
    pub last_checked_epoch: i64,
}

impl PersistedState {
    /// The state before any run has completed: empty and uninitialized.
    pub fn uninitialized() -> Self {
        Self {
            initialized: false,
            ids: HashSet::new(),
            count: None,
            last_checked_epoch: 0,
        }
    }

    /// The state to persist after reconciling against `snapshot`.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            initialized: true,
            ids: snapshot.ids.clone(),
            count: snapshot.count,
            last_checked_epoch: snapshot.observed_at_epoch,
        }
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::uninitialized()
    }
}

/// Sorts listing ids ascending by numeric value. Ids that do not parse as a
/// number order lexically after all numeric ones, keeping the sort total.
pub fn sort_ids_numeric(ids: impl IntoIterator<Item = ListingId>) -> Vec<ListingId> {
    let mut sorted: Vec<ListingId> = ids.into_iter().collect();
    sorted.sort_by(|a, b| id_order(a, b));
    sorted
}

fn id_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u128>(), b.parse::<u128>()) {
        // Lexical tie-break keeps ids like "07" and "7" in a stable order.
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
