use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::ports::outbound::{
    AlertQuery, DependencyTreeReader, DriftSource, OwnershipReader, ProgressReporter,
    VulnerabilityRepository,
};
use crate::shared::Result;
use crate::version_analysis::domain::{
    AlertNotice, DependencyGraph, DriftReport, LibraryRecord, OwnershipTable, Vulnerability,
};
use crate::version_analysis::services::{
    CycleBreaker, CycleReport, GraphImporter, NewAlertSelector, OwnershipResolver, RecordMerger,
    ReportGenerator, SummaryAggregator,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// AnalyzeEcosystemUseCase - analysis of one repository's package ecosystem
///
/// Reads the drift report, dependency tree and ownership declarations,
/// optionally fetches vulnerability alerts, then runs the pipeline:
/// import graph, break cycles, merge records, resolve owners, summarize.
/// Alerts-only ecosystems (pip) skip the drift and ownership reads.
///
/// # Type Parameters
/// * `DS` - DriftSource implementation
/// * `TR` - DependencyTreeReader implementation
/// * `OR` - OwnershipReader implementation
/// * `PR` - ProgressReporter implementation
/// * `VREPO` - VulnerabilityRepository implementation (optional)
pub struct AnalyzeEcosystemUseCase<DS, TR, OR, PR, VREPO> {
    drift_source: DS,
    tree_reader: TR,
    ownership_reader: OR,
    progress_reporter: PR,
    vulnerability_repository: Option<VREPO>,
}

impl<DS, TR, OR, PR, VREPO> AnalyzeEcosystemUseCase<DS, TR, OR, PR, VREPO>
where
    DS: DriftSource,
    TR: DependencyTreeReader,
    OR: OwnershipReader,
    PR: ProgressReporter,
    VREPO: VulnerabilityRepository,
{
    pub fn new(
        drift_source: DS,
        tree_reader: TR,
        ownership_reader: OR,
        progress_reporter: PR,
        vulnerability_repository: Option<VREPO>,
    ) -> Self {
        Self {
            drift_source,
            tree_reader,
            ownership_reader,
            progress_reporter,
            vulnerability_repository,
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        // Step 1: Drift report
        let drift = self.read_drift(&request)?;

        // Step 2: Dependency graph, made acyclic before anything walks it
        let mut graph = self.build_dependency_graph(&request)?;
        let cycle_report = self.break_cycles(&mut graph);

        // Step 3: Direct ownership declarations
        let ownership_table = self.read_ownerships(&request)?;

        // Step 4: Vulnerability alerts if requested
        let vulnerabilities = self.fetch_alerts_if_requested(&request).await?;

        // Step 5: Merge sources into one record per library
        let outcome = RecordMerger::merge(
            drift,
            vulnerabilities,
            &mut graph,
            &ownership_table,
            &request.ownership_config,
        );
        for library in &outcome.duplicate_drift_lines {
            self.progress_reporter.report_warning(&format!(
                "Drift report lists '{}' more than once; keeping the first line",
                library
            ));
        }
        for library in &outcome.unmatched_ownerships {
            self.progress_reporter.report_warning(&format!(
                "Ownership entry '{}' does not match any library",
                library
            ));
        }

        // Step 6: Propagate owners through the graph
        let mut records = outcome.records;
        let resolution = OwnershipResolver::resolve(&mut records, &graph);
        self.progress_reporter.report(&format!(
            "👥 Resolved owners: {} inherited, {} unknown",
            resolution.inherited, resolution.unknown
        ));

        // Step 7: Recently raised alerts, named by their resolved owner
        let new_alerts = self.select_new_alerts(&request, &records);

        // Step 8: Summary
        let summary = SummaryAggregator::summarize(records.values(), &outcome.totals);
        let metadata =
            ReportGenerator::generate_default_metadata(&request.repository, request.ecosystem);

        self.progress_reporter.report_completion(&format!(
            "✅ Analyzed {} libraries for {} ({}): score {}, {} unowned needing attention",
            summary.total_libraries,
            request.repository,
            request.ecosystem,
            summary.score,
            summary.unowned_needs_attention
        ));

        Ok(AnalysisResponse {
            metadata,
            records,
            graph,
            totals: outcome.totals,
            summary,
            cycle_report,
            resolution,
            unmatched_ownerships: outcome.unmatched_ownerships,
            new_alerts,
        })
    }

    fn read_drift(&self, request: &AnalysisRequest) -> Result<DriftReport> {
        if !request.ecosystem.reads_local_reports() {
            if request.github_owner.is_none() || self.vulnerability_repository.is_none() {
                self.progress_reporter.report_warning(&format!(
                    "{} is analyzed from vulnerability alerts only, but alert fetching is not configured",
                    request.ecosystem
                ));
            }
            return Ok(DriftReport::empty(request.ecosystem.drift_source()));
        }

        self.progress_reporter.report(&format!(
            "📖 Loading drift report from: {}",
            request.drift.report.display()
        ));

        let drift = self
            .drift_source
            .read_drift(request.ecosystem, &request.drift)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} outdated-version line(s)",
            drift.records().len()
        ));
        Ok(drift)
    }

    fn build_dependency_graph(&self, request: &AnalysisRequest) -> Result<DependencyGraph> {
        let Some(path) = &request.dependency_tree else {
            if request.ecosystem.reads_local_reports() {
                self.progress_reporter.report_warning(
                    "No dependency tree configured; owners will not propagate to transitive libraries",
                );
            }
            return Ok(DependencyGraph::new());
        };

        self.progress_reporter.report(&format!(
            "🌳 Loading dependency tree from: {}",
            path.display()
        ));
        let listing = self.tree_reader.read_dependency_tree(path)?;
        let graph = GraphImporter::import(&listing)?;

        self.progress_reporter.report(&format!(
            "✅ Imported {} libraries ({} direct, {} links)",
            graph.len(),
            graph.root_count(),
            graph.edge_count()
        ));
        Ok(graph)
    }

    fn break_cycles(&self, graph: &mut DependencyGraph) -> CycleReport {
        let report = CycleBreaker::break_cycles(graph);
        for edge in report.removed_edges() {
            self.progress_reporter.report_warning(&format!(
                "Dependency cycle: dropped link {} -> {}",
                edge.parent, edge.child
            ));
        }
        report
    }

    fn read_ownerships(&self, request: &AnalysisRequest) -> Result<OwnershipTable> {
        if !request.ecosystem.reads_local_reports() {
            return Ok(OwnershipTable::new());
        }

        self.progress_reporter.report(&format!(
            "🏷️  Loading ownerships from: {}",
            request.ownership_file.display()
        ));

        let table = self
            .ownership_reader
            .read_ownerships(request.ecosystem, &request.ownership_file)?;

        self.progress_reporter
            .report(&format!("✅ Found {} ownership declaration(s)", table.len()));
        Ok(table)
    }

    async fn fetch_alerts_if_requested(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Vec<Vulnerability>> {
        let (Some(repository), Some(owner)) =
            (&self.vulnerability_repository, &request.github_owner)
        else {
            return Ok(Vec::new());
        };

        self.progress_reporter.report(&format!(
            "🔍 Fetching vulnerability alerts for {}/{}...",
            owner, request.repository
        ));

        let query = AlertQuery {
            owner: owner.clone(),
            repository: request.repository.clone(),
            ecosystem: request.ecosystem,
            fixed_since: request.fixed_alerts_since,
        };
        let alerts = repository.fetch_alerts(&query).await?;

        self.progress_reporter
            .report(&format!("✅ Found {} vulnerability alert(s)", alerts.len()));
        Ok(alerts)
    }

    fn select_new_alerts(
        &self,
        request: &AnalysisRequest,
        records: &BTreeMap<String, LibraryRecord>,
    ) -> Vec<AlertNotice> {
        let Some(window) = request.notification_window else {
            return Vec::new();
        };

        let notices = NewAlertSelector::select(records.values(), Utc::now(), window);
        if !notices.is_empty() {
            self.progress_reporter.report(&format!(
                "🔔 {} alert(s) raised in the last {} hour(s)",
                notices.len(),
                window.num_hours()
            ));
        }
        notices
    }
}
