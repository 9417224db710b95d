use crate::version_analysis::domain::{
    AlertNotice, DependencyGraph, EcosystemTotals, HealthSummary, LibraryRecord, ReportMetadata,
};
use crate::version_analysis::services::{CycleReport, ResolutionReport};
use std::collections::BTreeMap;

/// AnalysisResponse - Internal response DTO from the analysis use case
///
/// Carries the resolved domain data; formatters work from the read model
/// built out of it.
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub metadata: ReportMetadata,
    /// Final records, one per library, ordered by name
    pub records: BTreeMap<String, LibraryRecord>,
    /// The sanitized (acyclic) dependency graph
    pub graph: DependencyGraph,
    pub totals: EcosystemTotals,
    pub summary: HealthSummary,
    pub cycle_report: CycleReport,
    pub resolution: ResolutionReport,
    /// Ownership table entries that matched no library
    pub unmatched_ownerships: Vec<String>,
    /// Recently created alerts to announce
    pub new_alerts: Vec<AlertNotice>,
}

impl AnalysisResponse {
    /// Whether any unowned library crossed an attention threshold.
    /// Drives the `--fail-on-unowned` exit code.
    pub fn has_unowned_issues(&self) -> bool {
        self.summary.needs_attention()
    }
}
