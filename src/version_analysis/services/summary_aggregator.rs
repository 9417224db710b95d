use crate::version_analysis::domain::{EcosystemTotals, HealthSummary, LibraryRecord};
use crate::version_analysis::policies::AttentionPolicy;

/// SummaryAggregator service reducing resolved records to health metrics
///
/// Each classified library lands in at most one drift bucket, checked in
/// order: major (split into 1, 2 and 3+), minor-only, patch-only. Records
/// with zero drift or no classification land in none. Owners are only read.
pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn summarize<'a, I>(records: I, totals: &EcosystemTotals) -> HealthSummary
    where
        I: IntoIterator<Item = &'a LibraryRecord>,
    {
        let mut summary = HealthSummary {
            total_age: totals.total_age,
            total_vulnerabilities: totals.total_vulnerabilities,
            ..Default::default()
        };

        for record in records {
            summary.total_libraries += 1;

            if let Some(drift) = record.drift() {
                match drift.major {
                    0 if drift.minor > 0 => summary.minor_only += 1,
                    0 if drift.patch > 0 => summary.patch_only += 1,
                    0 => {}
                    1 => summary.one_major += 1,
                    2 => summary.two_major += 1,
                    _ => summary.three_plus_major += 1,
                }
            }

            if AttentionPolicy::needs_attention(record) {
                summary.unowned_needs_attention += 1;
            }
        }

        summary.score = summary.weighted_score();
        summary
    }
}
