use crate::adapters::outbound::parsers::{
    BundlerLibyearParser, GemfileOwnershipParser, NpmLibyearParser, PackageJsonOwnershipParser,
};
use crate::ports::outbound::{DependencyTreeReader, DriftInputs, DriftSource, OwnershipReader};
use crate::shared::error::AnalysisError;
use crate::shared::security::read_checked_file;
use crate::shared::Result;
use crate::version_analysis::domain::{DependencyListing, DriftReport, Ecosystem, OwnershipTable};
use std::path::Path;

/// FileSystemReader adapter for the artifacts external tools leave on disk
///
/// Implements the DriftSource, DependencyTreeReader and OwnershipReader
/// ports. Every read goes through the shared file checks (no symlinks,
/// regular files only, size limit, optional freshness).
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn read(&self, path: &Path, description: &str) -> Result<String> {
        if !path.exists() {
            return Err(AnalysisError::FileReadError {
                path: path.to_path_buf(),
                details: format!("{} does not exist", description),
            }
            .into());
        }
        read_checked_file(path, description, None)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DriftSource for FileSystemReader {
    fn read_drift(&self, ecosystem: Ecosystem, inputs: &DriftInputs) -> Result<DriftReport> {
        if !ecosystem.reads_local_reports() {
            return Ok(DriftReport::empty(ecosystem.drift_source()));
        }
        if !inputs.report.exists() {
            return Err(AnalysisError::FileReadError {
                path: inputs.report.clone(),
                details: "drift report does not exist. Run `npx libyear --json > libyear_report.txt` (npm) or `libyear-bundler --versions` (bundler) first".to_string(),
            }
            .into());
        }
        let content = read_checked_file(&inputs.report, "drift report", inputs.max_age)?;

        match ecosystem {
            Ecosystem::Npm => NpmLibyearParser::parse(&content, &inputs.report),
            Ecosystem::Pip => Ok(DriftReport::empty(ecosystem.drift_source())),
            Ecosystem::Bundler => {
                let libyear = match &inputs.libyear_report {
                    Some(path) => Some((
                        read_checked_file(path, "libyear report", inputs.max_age)?,
                        path.as_path(),
                    )),
                    None => None,
                };
                BundlerLibyearParser::parse(
                    &content,
                    &inputs.report,
                    libyear.as_ref().map(|(content, path)| (content.as_str(), *path)),
                )
            }
        }
    }
}

impl DependencyTreeReader for FileSystemReader {
    fn read_dependency_tree(&self, path: &Path) -> Result<DependencyListing> {
        let content = self.read(path, "dependency tree")?;
        if content.trim_start().starts_with('{') {
            Ok(DependencyListing::Json(content))
        } else if content.lines().any(|line| line.trim() == "specs:") {
            Ok(DependencyListing::GemfileLock(content))
        } else {
            Ok(DependencyListing::Text(content))
        }
    }
}

impl OwnershipReader for FileSystemReader {
    fn read_ownerships(&self, ecosystem: Ecosystem, path: &Path) -> Result<OwnershipTable> {
        if !ecosystem.reads_local_reports() {
            return Ok(OwnershipTable::new());
        }
        let content = self.read(path, "ownership file")?;
        match ecosystem {
            Ecosystem::Npm => PackageJsonOwnershipParser::parse(&content, path),
            Ecosystem::Bundler => GemfileOwnershipParser::parse(&content, path),
            Ecosystem::Pip => Ok(OwnershipTable::new()),
        }
    }
}
