use crate::reconcile::ChangeReport;
use crate::state::Snapshot;

/// Static text pieces used when turning a report into a message.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Prefix joined with `/{id}` to build an absolute link per new listing.
    pub listing_url_base: String,
    /// First line of every update message.
    pub update_header: String,
}

/// One-time confirmation sent after the baseline run.
pub fn render_baseline(snapshot: &Snapshot) -> String {
    format!(
        "Listing monitor initialized.\nCurrent listings: {}",
        snapshot.display_total()
    )
}

/// Renders an update report, or `None` when there is nothing to say.
///
/// Non-empty blocks appear in a fixed order: count change, new listings
/// (as links), disappeared listings (as ids).
pub fn render_update(report: &ChangeReport, settings: &RenderSettings) -> Option<String> {
    if report.is_baseline || !report.has_changes() {
        return None;
    }

    let mut parts = Vec::new();

    if let Some((old, new)) = report.count_changed {
        parts.push(format!("Result count changed: {old} → {new}"));
    }

    if !report.added.is_empty() {
        let base = settings.listing_url_base.trim_end_matches('/');
        let links = report
            .added
            .iter()
            .map(|id| format!("{base}/{id}"))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("New listing(s): {}\n{}", report.added.len(), links));
    }

    if !report.removed.is_empty() {
        parts.push(format!(
            "Listing(s) disappeared: {} (IDs: {})",
            report.removed.len(),
            report.removed.join(", ")
        ));
    }

    Some(format!("{}\n\n{}", settings.update_header, parts.join("\n\n")))
}
