//! library-version-analysis - version drift and ownership reports for package ecosystems
//!
//! This library combines the output of drift tools (`libyear`, `libyear-bundler`),
//! a dependency tree (`npm list --all`), direct ownership declarations
//! (package.json `ownerships`, Gemfile `jgem`) and GitHub vulnerability alerts
//! into one record per library, propagates owners through the dependency
//! graph and scores the ecosystem's health.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`version_analysis`): records, owners, the dependency
//!   graph and the services that import, sanitize and resolve it
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use library_version_analysis::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let use_case: AnalyzeEcosystemUseCase<_, _, _, _, GitHubAlertClient> =
//!     AnalyzeEcosystemUseCase::new(
//!         FileSystemReader::new(),
//!         FileSystemReader::new(),
//!         FileSystemReader::new(),
//!         StderrProgressReporter::new(),
//!         None,
//!     );
//!
//! let request = AnalysisRequest::new(
//!     "web".to_string(),
//!     Ecosystem::Npm,
//!     Some(PathBuf::from("npm-list.json")),
//!     DriftInputs {
//!         report: PathBuf::from("libyear_report.txt"),
//!         libyear_report: None,
//!         max_age: None,
//!     },
//!     PathBuf::from("package.json"),
//! );
//! let response = use_case.execute(request).await?;
//!
//! let model = AnalysisReadModelBuilder::build(&response);
//! println!("{}", MarkdownFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod version_analysis;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::{GitHubAlertClient, UploadClient, WebhookNotifier};
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse, OutputFormat};
    pub use crate::application::read_models::{AnalysisReadModel, AnalysisReadModelBuilder};
    pub use crate::application::use_cases::AnalyzeEcosystemUseCase;
    pub use crate::ports::outbound::{
        AlertQuery, DependencyTreeReader, DriftInputs, DriftSource, NotificationSink,
        OutputPresenter, OwnershipReader, ProgressReporter, ReportFormatter, ReportSink,
        VulnerabilityRepository,
    };
    pub use crate::shared::error::{AnalysisError, ExitCode};
    pub use crate::shared::Result;
    pub use crate::version_analysis::domain::{
        AlertNotice, AlertState, DependencyGraph, DependencyListing, DriftRecord, DriftReport,
        DriftSourceKind, Ecosystem, HealthSummary, LibraryRecord, Owner, OwnerReason,
        OwnershipConfig, OwnershipTable, Severity, SpecialCaseOwnership, VersionDrift,
        Vulnerability,
    };
    pub use crate::version_analysis::policies::AttentionPolicy;
    pub use crate::version_analysis::services::{
        CycleBreaker, GraphImporter, NewAlertSelector, OwnershipResolver, RecordMerger,
        SummaryAggregator,
    };
}
