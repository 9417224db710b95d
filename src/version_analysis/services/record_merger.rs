use crate::version_analysis::domain::{
    DependencyGraph, DriftReport, EcosystemTotals, LibraryRecord, OwnerReason, OwnershipConfig,
    OwnershipTable, Vulnerability,
};
use std::collections::BTreeMap;

/// Result of merging all sources for one ecosystem
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// One record per library name, ordered by name
    pub records: BTreeMap<String, LibraryRecord>,
    pub totals: EcosystemTotals,
    /// Ownership table entries naming a library no source reported
    pub unmatched_ownerships: Vec<String>,
    /// Drift lines dropped because an earlier line named the same library
    pub duplicate_drift_lines: Vec<String>,
}

/// RecordMerger service combining drift, vulnerability and graph sources
///
/// Merge order:
/// 1. drift lines seed records with the default owner; the first line for
///    a name wins and repeats count toward neither records nor totals
/// 2. vulnerabilities attach in source order, creating zero-drift records
/// 3. graph nodes without a record get an unclassified one
/// 4. the ownership table assigns owners to existing records
/// 5. special cases override owners and hang the library under its label
pub struct RecordMerger;

impl RecordMerger {
    pub fn merge(
        drift: DriftReport,
        vulnerabilities: Vec<Vulnerability>,
        graph: &mut DependencyGraph,
        ownership_table: &OwnershipTable,
        config: &OwnershipConfig,
    ) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        Self::merge_drift(&mut outcome, drift, config);
        Self::merge_vulnerabilities(&mut outcome, vulnerabilities, config);
        Self::merge_graph(&mut outcome, graph, config);
        Self::apply_ownership_table(&mut outcome, ownership_table);
        Self::apply_special_cases(&mut outcome, graph, config);
        outcome
    }

    fn merge_drift(outcome: &mut MergeOutcome, drift: DriftReport, config: &OwnershipConfig) {
        let source = drift.source();
        let mut raw_age_total = 0.0;

        for line in drift.into_records() {
            if outcome.records.contains_key(&line.name) {
                outcome.duplicate_drift_lines.push(line.name);
                continue;
            }
            raw_age_total += line.age.unwrap_or(0.0);
            outcome.totals.total_releases += 1;
            outcome.totals.total_major += u64::from(line.drift.major);
            outcome.totals.total_minor += u64::from(line.drift.minor);
            outcome.totals.total_patch += u64::from(line.drift.patch);

            let age = line.age.map(|raw| source.round_age(raw));
            let record = LibraryRecord::from_drift(&line, config.default_owner().clone(), age);
            outcome.records.insert(line.name, record);
        }

        outcome.totals.total_age = source.round_total(raw_age_total);
    }

    fn merge_vulnerabilities(
        outcome: &mut MergeOutcome,
        vulnerabilities: Vec<Vulnerability>,
        config: &OwnershipConfig,
    ) {
        for vulnerability in vulnerabilities {
            outcome.totals.total_vulnerabilities += 1;
            outcome
                .records
                .entry(vulnerability.package().to_string())
                .or_insert_with_key(|name| {
                    LibraryRecord::zero_drift(name.clone(), config.default_owner().clone())
                })
                .push_vulnerability(vulnerability);
        }
    }

    fn merge_graph(outcome: &mut MergeOutcome, graph: &DependencyGraph, config: &OwnershipConfig) {
        for node in graph.nodes() {
            let record = outcome
                .records
                .entry(node.name().to_string())
                .or_insert_with_key(|name| {
                    LibraryRecord::new(name.clone(), config.default_owner().clone())
                });
            if let Some(version) = node.version() {
                record.fill_current_version(version);
            }
        }
    }

    fn apply_ownership_table(outcome: &mut MergeOutcome, table: &OwnershipTable) {
        for (library, entry) in table.iter() {
            match outcome.records.get_mut(library) {
                Some(record) => {
                    let reason = entry.reason.clone().unwrap_or(OwnerReason::Assigned);
                    record.set_owner(entry.owner.clone(), Some(reason));
                }
                None => outcome.unmatched_ownerships.push(library.to_string()),
            }
        }
    }

    fn apply_special_cases(
        outcome: &mut MergeOutcome,
        graph: &mut DependencyGraph,
        config: &OwnershipConfig,
    ) {
        for (library, case) in config.special_cases() {
            let record = outcome
                .records
                .entry(library.to_string())
                .or_insert_with_key(|name| {
                    LibraryRecord::zero_drift(name.clone(), case.owner().clone())
                });
            record.set_owner(case.owner().clone(), Some(OwnerReason::Configured));
            record.set_parent_label(case.parent_label());

            let label = graph.ensure_node(case.parent_label());
            let node = graph.ensure_node(library);
            // A parentless label cannot close a cycle through the new edge.
            if label != node && graph.node(label).is_root() {
                graph.add_parent(node, label);
            }
        }
    }
}
