use crate::ports::outbound::DriftInputs;
use crate::version_analysis::domain::{Ecosystem, OwnershipConfig};
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

/// AnalysisRequest - Internal request DTO for one ecosystem run
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Repository name used for alerts and report metadata
    pub repository: String,
    pub ecosystem: Ecosystem,
    /// `npm list --all` output, JSON or text; without it every library is a root
    pub dependency_tree: Option<PathBuf>,
    pub drift: DriftInputs,
    /// package.json or Gemfile carrying direct ownership declarations
    pub ownership_file: PathBuf,
    pub ownership_config: OwnershipConfig,
    /// GitHub owner of the repository; alerts are skipped when absent
    pub github_owner: Option<String>,
    /// Also report alerts fixed at or after this instant
    pub fixed_alerts_since: Option<DateTime<Utc>>,
    /// Alerts created within this window become notices; none when absent
    pub notification_window: Option<Duration>,
}

impl AnalysisRequest {
    pub fn new(
        repository: String,
        ecosystem: Ecosystem,
        dependency_tree: Option<PathBuf>,
        drift: DriftInputs,
        ownership_file: PathBuf,
    ) -> Self {
        Self {
            repository,
            ecosystem,
            dependency_tree,
            drift,
            ownership_file,
            ownership_config: OwnershipConfig::default(),
            github_owner: None,
            fixed_alerts_since: None,
            notification_window: None,
        }
    }

    pub fn with_ownership_config(mut self, config: OwnershipConfig) -> Self {
        self.ownership_config = config;
        self
    }

    pub fn with_alerts(mut self, github_owner: String, fixed_since: Option<DateTime<Utc>>) -> Self {
        self.github_owner = Some(github_owner);
        self.fixed_alerts_since = fixed_since;
        self
    }

    pub fn with_notification_window(mut self, window: Duration) -> Self {
        self.notification_window = Some(window);
        self
    }
}
