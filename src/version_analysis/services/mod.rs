mod cycle_breaker;
mod graph_importer;
mod new_alert_selector;
mod ownership_resolver;
mod record_merger;
mod report_generator;
mod summary_aggregator;

pub use cycle_breaker::{CycleBreaker, CycleReport, RemovedEdge};
pub use graph_importer::GraphImporter;
pub use new_alert_selector::NewAlertSelector;
pub use ownership_resolver::{OwnershipResolver, ResolutionReport};
pub use record_merger::{MergeOutcome, RecordMerger};
pub use report_generator::{ReportGenerator, TOOL_NAME};
pub use summary_aggregator::SummaryAggregator;
