pub mod alert_notice;
pub mod dependency_graph;
pub mod drift;
pub mod health_summary;
pub mod library_record;
pub mod owner;
pub mod ownership_table;
pub mod report_metadata;
pub mod vulnerability;

pub use alert_notice::AlertNotice;
pub use dependency_graph::{DependencyGraph, DependencyListing, DependencyNode, NodeId};
pub use drift::{DriftRecord, DriftReport, DriftSourceKind, EcosystemTotals, VersionDrift};
pub use health_summary::HealthSummary;
pub use library_record::LibraryRecord;
pub use owner::{Owner, OwnerReason};
pub use ownership_table::{OwnershipConfig, OwnershipEntry, OwnershipTable, SpecialCaseOwnership};
pub use report_metadata::{Ecosystem, ReportMetadata};
pub use vulnerability::{AlertState, Severity, Vulnerability};
