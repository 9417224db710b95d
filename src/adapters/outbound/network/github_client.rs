use crate::ports::outbound::{AlertProgressCallback, AlertQuery, VulnerabilityRepository};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use crate::version_analysis::domain::{AlertState, Severity, Vulnerability};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

const ALERTS_QUERY: &str = r#"
query($owner: String!, $name: String!, $states: [RepositoryVulnerabilityAlertState!], $cursor: String) {
  repository(owner: $owner, name: $name) {
    vulnerabilityAlerts(first: 100, states: $states, after: $cursor) {
      totalCount
      nodes {
        state
        createdAt
        fixedAt
        securityVulnerability {
          package { ecosystem name }
          advisory {
            databaseId
            identifiers { type value }
            permalink
          }
          severity
        }
      }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: AlertVariables<'a>,
}

#[derive(Debug, Serialize)]
struct AlertVariables<'a> {
    owner: &'a str,
    name: &'a str,
    states: [&'static str; 1],
    cursor: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    vulnerability_alerts: AlertConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertConnection {
    total_count: usize,
    nodes: Vec<AlertNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertNode {
    state: String,
    created_at: Option<DateTime<Utc>>,
    fixed_at: Option<DateTime<Utc>>,
    security_vulnerability: SecurityVulnerability,
}

#[derive(Debug, Deserialize)]
struct SecurityVulnerability {
    package: AdvisoryPackage,
    advisory: Advisory,
    severity: String,
}

#[derive(Debug, Deserialize)]
struct AdvisoryPackage {
    ecosystem: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Advisory {
    database_id: i64,
    identifiers: Vec<AdvisoryIdentifier>,
    permalink: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdvisoryIdentifier {
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

/// Accumulates alerts across pages and alert states
#[derive(Debug, Default)]
struct AlertCollector {
    seen_advisories: HashSet<i64>,
    alerts: Vec<Vulnerability>,
}

/// What one page contributed
#[derive(Debug, PartialEq, Eq)]
struct PageOutcome {
    total_count: usize,
    node_count: usize,
    next_cursor: Option<String>,
}

impl AlertCollector {
    /// Folds one raw GraphQL response body into the collection.
    ///
    /// Keeps alerts for `ecosystem` only, skips advisories already seen, and
    /// drops fixed alerts outside the `fixed_since` window.
    fn add_page(
        &mut self,
        body: &str,
        ecosystem: &str,
        fixed_since: Option<DateTime<Utc>>,
    ) -> Result<PageOutcome> {
        let response: GraphQlResponse =
            serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(AnalysisError::RemoteServiceError {
                service: "GitHub GraphQL".to_string(),
                details: messages.join(", "),
            }
            .into());
        }

        let connection = response
            .data
            .and_then(|data| data.repository)
            .map(|repository| repository.vulnerability_alerts)
            .ok_or_else(|| malformed("response has no repository".to_string()))?;

        let node_count = connection.nodes.len();
        for node in connection.nodes {
            let vulnerability = &node.security_vulnerability;
            if vulnerability.package.ecosystem != ecosystem {
                continue;
            }

            let state = AlertState::parse(&node.state)
                .ok_or_else(|| malformed(format!("unknown alert state '{}'", node.state)))?;
            if state == AlertState::Fixed
                && !node
                    .fixed_at
                    .is_some_and(|fixed_at| fixed_since.is_some_and(|since| fixed_at >= since))
            {
                continue;
            }

            if !self.seen_advisories.insert(vulnerability.advisory.database_id) {
                continue;
            }

            self.alerts.push(Self::convert(node, state)?);
        }

        let next_cursor = if connection.page_info.has_next_page {
            Some(
                connection
                    .page_info
                    .end_cursor
                    .ok_or_else(|| malformed("hasNextPage without endCursor".to_string()))?,
            )
        } else {
            None
        };

        Ok(PageOutcome {
            total_count: connection.total_count,
            node_count,
            next_cursor,
        })
    }

    fn convert(node: AlertNode, state: AlertState) -> Result<Vulnerability> {
        let SecurityVulnerability {
            package,
            advisory,
            severity,
        } = node.security_vulnerability;
        let severity = Severity::parse(&severity)
            .ok_or_else(|| malformed(format!("unknown severity '{}'", severity)))?;

        let mut vulnerability = Vulnerability::new(
            package.name,
            advisory.identifiers.into_iter().map(|id| id.value).collect(),
            severity,
            state,
        );
        if let Some(created_at) = node.created_at {
            vulnerability = vulnerability.with_created_at(created_at);
        }
        if let Some(fixed_at) = node.fixed_at {
            vulnerability = vulnerability.with_fixed_at(fixed_at);
        }
        if let Some(permalink) = advisory.permalink {
            vulnerability = vulnerability.with_permalink(permalink);
        }
        Ok(vulnerability)
    }
}

fn malformed(details: String) -> anyhow::Error {
    AnalysisError::MalformedAlertResponse { details }.into()
}

/// GitHubAlertClient adapter for Dependabot vulnerability alerts
///
/// Queries the GitHub GraphQL API for open alerts and, when a window is
/// given, alerts fixed inside it. Pages are fetched sequentially by cursor.
pub struct GitHubAlertClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    progress: Option<AlertProgressCallback>,
}

impl GitHubAlertClient {
    const API_ENDPOINT: &'static str = "https://api.github.com/graphql";
    const TIMEOUT_SECONDS: u64 = 30;
    pub const TOKEN_VARIABLE: &'static str = "GITHUB_READ_API_TOKEN";

    /// Creates a client with an explicit token
    pub fn new(token: String) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(AnalysisError::MissingCredential {
                name: Self::TOKEN_VARIABLE.to_string(),
            }
            .into());
        }

        let user_agent = format!("library-version-analysis/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: Self::API_ENDPOINT.to_string(),
            token,
            progress: None,
        })
    }

    /// Creates a client with the token from `GITHUB_READ_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var(Self::TOKEN_VARIABLE).unwrap_or_default())
    }

    pub fn with_progress(mut self, progress: AlertProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    async fn fetch_page(
        &self,
        query: &AlertQuery,
        state: &'static str,
        cursor: Option<&str>,
    ) -> Result<String> {
        let request = GraphQlRequest {
            query: ALERTS_QUERY,
            variables: AlertVariables {
                owner: &query.owner,
                name: &query.repository,
                states: [state],
                cursor,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::RemoteServiceError {
                service: "GitHub GraphQL".to_string(),
                details: format!("status code {}", status),
            }
            .into());
        }

        Ok(response.text().await?)
    }

    async fn collect_state(
        &self,
        query: &AlertQuery,
        state: &'static str,
        collector: &mut AlertCollector,
    ) -> Result<()> {
        let ecosystem = query.ecosystem.advisory_ecosystem();
        let mut cursor: Option<String> = None;
        let mut fetched = 0;

        loop {
            let body = self.fetch_page(query, state, cursor.as_deref()).await?;
            let page = collector.add_page(&body, ecosystem, query.fixed_since)?;

            fetched += page.node_count;
            if let Some(progress) = &self.progress {
                progress(fetched.min(page.total_count), page.total_count);
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => return Ok(()),
            }
        }
    }
}

#[async_trait]
impl VulnerabilityRepository for GitHubAlertClient {
    async fn fetch_alerts(&self, query: &AlertQuery) -> Result<Vec<Vulnerability>> {
        let mut collector = AlertCollector::default();

        self.collect_state(query, "OPEN", &mut collector).await?;
        if query.fixed_since.is_some() {
            self.collect_state(query, "FIXED", &mut collector).await?;
        }

        Ok(collector.alerts)
    }
}
