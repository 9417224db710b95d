use async_trait::async_trait;
use library_version_analysis::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock VulnerabilityRepository that records the queries it receives
#[derive(Default)]
pub struct MockVulnerabilityRepository {
    alerts: Vec<Vulnerability>,
    pub queries: Arc<Mutex<Vec<AlertQuery>>>,
}

impl MockVulnerabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(mut self, library: &str, identifier: &str, severity: Severity) -> Self {
        self.alerts.push(Vulnerability::new(
            library.to_string(),
            vec![identifier.to_string()],
            severity,
            AlertState::Open,
        ));
        self
    }

    pub fn with_recent_alert(
        mut self,
        library: &str,
        identifier: &str,
        severity: Severity,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        self.alerts.push(
            Vulnerability::new(
                library.to_string(),
                vec![identifier.to_string()],
                severity,
                AlertState::Open,
            )
            .with_created_at(created_at),
        );
        self
    }
}

#[async_trait]
impl VulnerabilityRepository for MockVulnerabilityRepository {
    async fn fetch_alerts(&self, query: &AlertQuery) -> Result<Vec<Vulnerability>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.alerts.clone())
    }
}
