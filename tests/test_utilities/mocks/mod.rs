/// Mock implementations for testing
mod mock_drift_source;
mod mock_ownership_reader;
mod mock_progress_reporter;
mod mock_tree_reader;
mod mock_vulnerability_repository;

pub use mock_drift_source::MockDriftSource;
pub use mock_ownership_reader::MockOwnershipReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_tree_reader::MockTreeReader;
pub use mock_vulnerability_repository::MockVulnerabilityRepository;
