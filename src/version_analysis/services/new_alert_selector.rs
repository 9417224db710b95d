use crate::version_analysis::domain::{AlertNotice, LibraryRecord};
use chrono::{DateTime, Duration, Utc};

/// NewAlertSelector service for picking alerts worth announcing
///
/// Runs after owner resolution so each notice names the final owner.
pub struct NewAlertSelector;

impl NewAlertSelector {
    /// Hours looked back when no window is configured; a daily run with
    /// an hour of slack.
    pub const DEFAULT_WINDOW_HOURS: i64 = 25;

    /// Alerts created strictly after `now - window`, in record order and
    /// then source order. Alerts without a creation time are skipped.
    pub fn select<'a>(
        records: impl IntoIterator<Item = &'a LibraryRecord>,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Vec<AlertNotice> {
        let cutoff = now - window;

        records
            .into_iter()
            .flat_map(|record| {
                record.vulnerabilities().iter().filter_map(move |vulnerability| {
                    let created_at = vulnerability.created_at()?;
                    (created_at > cutoff).then(|| AlertNotice {
                        library: record.name().to_string(),
                        severity: vulnerability.severity(),
                        identifiers: vulnerability.identifiers().to_vec(),
                        owner: record.owner().clone(),
                        permalink: vulnerability.permalink().map(str::to_string),
                        created_at,
                    })
                })
            })
            .collect()
    }
}
