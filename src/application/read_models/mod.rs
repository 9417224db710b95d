//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of domain data for reports.

mod analysis_read_model;
mod analysis_read_model_builder;

pub use analysis_read_model::{
    AnalysisReadModel, CycleEdgeView, DependencyView, LibraryView, MetadataView, NewVersionView,
    VulnerabilityView,
};
pub use analysis_read_model_builder::AnalysisReadModelBuilder;
