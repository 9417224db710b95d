//! Analysis read model
//!
//! The report shape shared by every formatter. Serializing it with serde
//! yields the upload payload.

use crate::version_analysis::domain::{
    AlertState, Ecosystem, EcosystemTotals, HealthSummary, Severity, VersionDrift,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Main read model for one ecosystem report
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReadModel {
    pub metadata: MetadataView,
    /// One entry per library, ordered by name
    pub libraries: Vec<LibraryView>,
    /// Libraries with a newer release available
    pub new_versions: Vec<NewVersionView>,
    pub vulnerabilities: Vec<VulnerabilityView>,
    pub dependencies: Vec<DependencyView>,
    pub summary: HealthSummary,
    pub totals: EcosystemTotals,
    pub removed_cycle_edges: Vec<CycleEdgeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataView {
    pub run_id: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub repository: String,
    pub ecosystem: Ecosystem,
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryView {
    pub name: String,
    pub owner: String,
    pub owner_reason: Option<String>,
    /// Display parent for special-case ownership
    pub parent: Option<String>,
    pub version: Option<String>,
    pub version_date: Option<NaiveDate>,
    pub latest_version: Option<String>,
    pub latest_version_date: Option<NaiveDate>,
    pub drift: Option<VersionDrift>,
    pub age: Option<f64>,
    /// Severity of the first open vulnerability
    pub severity: Option<Severity>,
    pub needs_attention: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewVersionView {
    pub name: String,
    pub version: Option<String>,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct VulnerabilityView {
    pub library: String,
    /// Advisory identifiers joined with ", "
    pub identifier: String,
    pub assigned_severity: Severity,
    pub state: AlertState,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub fixed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyView {
    pub name: String,
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleEdgeView {
    pub child: String,
    pub parent: String,
}

impl AnalysisReadModel {
    /// Libraries flagged by the attention policy
    pub fn attention_libraries(&self) -> impl Iterator<Item = &LibraryView> {
        self.libraries.iter().filter(|library| library.needs_attention)
    }
}
