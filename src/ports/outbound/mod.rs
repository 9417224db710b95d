/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod dependency_tree_reader;
pub mod drift_source;
pub mod formatter;
pub mod notification_sink;
pub mod output_presenter;
pub mod ownership_reader;
pub mod progress_reporter;
pub mod report_sink;
pub mod vulnerability_repository;

pub use dependency_tree_reader::DependencyTreeReader;
pub use drift_source::{DriftInputs, DriftSource};
pub use formatter::ReportFormatter;
pub use notification_sink::NotificationSink;
pub use output_presenter::OutputPresenter;
pub use ownership_reader::OwnershipReader;
pub use progress_reporter::ProgressReporter;
pub use report_sink::ReportSink;
pub use vulnerability_repository::{AlertProgressCallback, AlertQuery, VulnerabilityRepository};
