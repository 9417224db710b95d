use crate::version_analysis::domain::{Ecosystem, ReportMetadata};
use chrono::Utc;
use uuid::Uuid;

pub const TOOL_NAME: &str = "library-version-analysis";

/// ReportGenerator service for report run metadata
pub struct ReportGenerator;

impl ReportGenerator {
    /// Generates metadata with the current timestamp and a fresh run id
    pub fn generate_metadata(
        tool_name: &str,
        tool_version: &str,
        repository: &str,
        ecosystem: Ecosystem,
    ) -> ReportMetadata {
        ReportMetadata::new(
            Uuid::new_v4().to_string(),
            Utc::now(),
            tool_name.to_string(),
            tool_version.to_string(),
            repository.to_string(),
            ecosystem,
        )
    }

    /// Metadata stamped with this crate's name and compile-time version
    pub fn generate_default_metadata(repository: &str, ecosystem: Ecosystem) -> ReportMetadata {
        Self::generate_metadata(TOOL_NAME, env!("CARGO_PKG_VERSION"), repository, ecosystem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_metadata() {
        let metadata = ReportGenerator::generate_metadata("tool", "1.0.0", "repo", Ecosystem::Npm);

        assert_eq!(metadata.tool_name(), "tool");
        assert_eq!(metadata.tool_version(), "1.0.0");
        assert_eq!(metadata.repository(), "repo");
        assert!(Uuid::parse_str(metadata.run_id()).is_ok());
    }

    #[test]
    fn test_generate_default_metadata() {
        let metadata = ReportGenerator::generate_default_metadata("repo", Ecosystem::Bundler);

        assert_eq!(metadata.tool_name(), TOOL_NAME);
        assert_eq!(metadata.tool_version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(metadata.ecosystem(), Ecosystem::Bundler);
    }

    #[test]
    fn test_generate_metadata_unique_run_ids() {
        let first = ReportGenerator::generate_default_metadata("repo", Ecosystem::Npm);
        let second = ReportGenerator::generate_default_metadata("repo", Ecosystem::Npm);

        assert_ne!(first.run_id(), second.run_id());
    }
}
