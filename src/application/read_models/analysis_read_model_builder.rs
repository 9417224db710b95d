//! Builder for constructing AnalysisReadModel from the use case response

use super::analysis_read_model::{
    AnalysisReadModel, CycleEdgeView, DependencyView, LibraryView, MetadataView, NewVersionView,
    VulnerabilityView,
};
use crate::application::dto::AnalysisResponse;
use crate::version_analysis::domain::{LibraryRecord, ReportMetadata};
use crate::version_analysis::policies::AttentionPolicy;
use chrono::SecondsFormat;

/// Builder for constructing AnalysisReadModel from domain objects
pub struct AnalysisReadModelBuilder;

impl AnalysisReadModelBuilder {
    pub fn build(response: &AnalysisResponse) -> AnalysisReadModel {
        let records: Vec<&LibraryRecord> = response.records.values().collect();

        AnalysisReadModel {
            metadata: Self::build_metadata(&response.metadata),
            libraries: records.iter().map(|r| Self::build_library(r)).collect(),
            new_versions: records
                .iter()
                .filter_map(|r| Self::build_new_version(r))
                .collect(),
            vulnerabilities: records
                .iter()
                .flat_map(|r| Self::build_vulnerabilities(r))
                .collect(),
            dependencies: response
                .graph
                .adjacency()
                .into_iter()
                .map(|(name, parents)| DependencyView { name, parents })
                .collect(),
            summary: response.summary.clone(),
            totals: response.totals.clone(),
            removed_cycle_edges: response
                .cycle_report
                .removed_edges()
                .iter()
                .map(|edge| CycleEdgeView {
                    child: edge.child.clone(),
                    parent: edge.parent.clone(),
                })
                .collect(),
        }
    }

    fn build_metadata(metadata: &ReportMetadata) -> MetadataView {
        MetadataView {
            run_id: metadata.run_id().to_string(),
            timestamp: metadata
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            repository: metadata.repository().to_string(),
            ecosystem: metadata.ecosystem(),
        }
    }

    fn build_library(record: &LibraryRecord) -> LibraryView {
        LibraryView {
            name: record.name().to_string(),
            owner: record.owner().to_string(),
            owner_reason: record.owner_reason().map(|reason| reason.to_string()),
            parent: record.parent_label().map(str::to_string),
            version: record.current_version().map(str::to_string),
            version_date: record.current_version_date(),
            latest_version: record.latest_version().map(str::to_string),
            latest_version_date: record.latest_version_date(),
            drift: record.drift(),
            age: record.age(),
            severity: record.headline_vulnerability().map(|v| v.severity()),
            needs_attention: AttentionPolicy::needs_attention(record),
        }
    }

    fn build_new_version(record: &LibraryRecord) -> Option<NewVersionView> {
        if !record.has_newer_version() {
            return None;
        }
        let drift = record.drift()?;
        Some(NewVersionView {
            name: record.name().to_string(),
            version: record.latest_version().map(str::to_string),
            major: drift.major,
            minor: drift.minor,
            patch: drift.patch,
        })
    }

    fn build_vulnerabilities(record: &LibraryRecord) -> Vec<VulnerabilityView> {
        record
            .vulnerabilities()
            .iter()
            .map(|v| VulnerabilityView {
                library: record.name().to_string(),
                identifier: v.identifiers().join(", "),
                assigned_severity: v.severity(),
                state: v.state(),
                url: v.permalink().map(str::to_string),
                created_at: v
                    .created_at()
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
                fixed_at: v
                    .fixed_at()
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            })
            .collect()
    }
}
