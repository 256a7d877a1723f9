//! Monitor core: pure snapshot reconciliation and message rendering.
mod reconcile;
mod render;
mod state;

pub use reconcile::{reconcile, ChangeReport};
pub use render::{render_baseline, render_update, RenderSettings};
pub use state::{sort_ids_numeric, ListingId, PersistedState, Snapshot};
