use crate::shared::Result;
use crate::version_analysis::domain::{DriftReport, Ecosystem};
use std::path::PathBuf;
use std::time::Duration;

/// Where a drift tool left its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftInputs {
    /// `npx libyear --json` output, or `libyear-bundler --versions` output
    pub report: PathBuf,
    /// `libyear-bundler --libyear` output (bundler only)
    pub libyear_report: Option<PathBuf>,
    /// Reject reports older than this
    pub max_age: Option<Duration>,
}

/// DriftSource port for per-library version drift
///
/// The drift tool runs outside this process; implementations read and parse
/// what it produced.
pub trait DriftSource {
    /// Loads the drift report for `ecosystem`
    ///
    /// # Errors
    /// Returns an error if:
    /// - a report file is missing, stale or unreadable
    /// - the report does not have the shape the tool produces (`MalformedDriftReport`)
    fn read_drift(&self, ecosystem: Ecosystem, inputs: &DriftInputs) -> Result<DriftReport>;
}
