use crate::shared::error::AnalysisError;
use crate::shared::Result;
use crate::version_analysis::domain::{DriftRecord, DriftReport, DriftSourceKind, VersionDrift};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LibyearEntry {
    dependency: String,
    drift: Option<f64>,
    #[serde(default)]
    major: u32,
    #[serde(default)]
    minor: u32,
    #[serde(default)]
    patch: u32,
    available: Option<String>,
}

/// Parser for `npx libyear --json` output
///
/// The report carries no current version; that comes from the dependency
/// tree during the merge. A missing `drift` counts as zero library-years.
pub struct NpmLibyearParser;

impl NpmLibyearParser {
    pub fn parse(content: &str, path: &Path) -> Result<DriftReport> {
        let entries: Vec<LibyearEntry> =
            serde_json::from_str(content).map_err(|e| AnalysisError::MalformedDriftReport {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        let records = entries
            .into_iter()
            .map(|entry| {
                let mut record = DriftRecord::new(
                    entry.dependency,
                    VersionDrift::new(entry.major, entry.minor, entry.patch),
                );
                record.latest_version = entry.available;
                record.age = Some(entry.drift.unwrap_or(0.0));
                record
            })
            .collect();

        Ok(DriftReport::new(DriftSourceKind::NpmLibyear, records))
    }
}
