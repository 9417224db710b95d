use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::DriftSourceKind;

/// Package ecosystem scanned in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Bundler,
    /// Poetry/pip projects, analyzed from vulnerability alerts only
    Pip,
}

impl Ecosystem {
    /// Ecosystem label used by the GitHub advisory database
    pub fn advisory_ecosystem(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "NPM",
            Ecosystem::Bundler => "RUBYGEMS",
            Ecosystem::Pip => "PIP",
        }
    }

    pub fn drift_source(&self) -> DriftSourceKind {
        match self {
            Ecosystem::Npm => DriftSourceKind::NpmLibyear,
            Ecosystem::Bundler => DriftSourceKind::BundlerLibyear,
            Ecosystem::Pip => DriftSourceKind::AlertsOnly,
        }
    }

    /// Whether drift reports and ownership declarations exist on disk.
    /// Alerts-only ecosystems skip both reads.
    pub fn reads_local_reports(&self) -> bool {
        self.drift_source() != DriftSourceKind::AlertsOnly
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Ecosystem::Npm),
            "bundler" | "gemfile" | "rubygems" => Ok(Ecosystem::Bundler),
            "pip" | "poetry" => Ok(Ecosystem::Pip),
            _ => Err(format!(
                "Invalid ecosystem: {}. Valid values are: npm, bundler, pip",
                s
            )),
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ecosystem::Npm => write!(f, "npm"),
            Ecosystem::Bundler => write!(f, "bundler"),
            Ecosystem::Pip => write!(f, "pip"),
        }
    }
}

/// ReportMetadata value object identifying one analysis run
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    run_id: String,
    timestamp: DateTime<Utc>,
    tool_name: String,
    tool_version: String,
    repository: String,
    ecosystem: Ecosystem,
}

impl ReportMetadata {
    pub fn new(
        run_id: String,
        timestamp: DateTime<Utc>,
        tool_name: String,
        tool_version: String,
        repository: String,
        ecosystem: Ecosystem,
    ) -> Self {
        Self {
            run_id,
            timestamp,
            tool_name,
            tool_version,
            repository,
            ecosystem,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }
}
