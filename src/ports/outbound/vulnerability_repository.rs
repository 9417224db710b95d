use crate::shared::Result;
use crate::version_analysis::domain::{Ecosystem, Vulnerability};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Progress callback for paged fetching: (alerts seen, total alerts)
pub type AlertProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Which alerts to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertQuery {
    /// Repository owner (user or organization)
    pub owner: String,
    pub repository: String,
    pub ecosystem: Ecosystem,
    /// Also fetch alerts fixed at or after this instant
    pub fixed_since: Option<DateTime<Utc>>,
}

/// VulnerabilityRepository port for fetching vulnerability alerts
///
/// # Async Support
/// Fetching is async; implementations must be `Send + Sync`.
#[async_trait]
pub trait VulnerabilityRepository: Send + Sync {
    /// Fetches the alerts for one repository and ecosystem
    ///
    /// Implementations return open alerts plus fixed ones inside the
    /// `fixed_since` window, deduplicated by advisory, in source order.
    ///
    /// # Errors
    /// Returns an error if:
    /// - credentials are missing
    /// - the network request fails or returns an error status
    /// - the response does not have the expected shape
    async fn fetch_alerts(&self, query: &AlertQuery) -> Result<Vec<Vulnerability>>;
}
