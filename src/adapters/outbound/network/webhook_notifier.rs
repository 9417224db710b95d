use crate::ports::outbound::NotificationSink;
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use crate::version_analysis::domain::AlertNotice;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Incoming-webhook body understood by Slack and compatible chat services
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
    unfurl_links: bool,
}

/// WebhookNotifier adapter that posts each alert notice to a chat webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    const TIMEOUT_SECONDS: u64 = 15;
    pub const URL_VARIABLE: &'static str = "ALERT_WEBHOOK_URL";

    pub fn new(url: String) -> Result<Self> {
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(AnalysisError::Validation {
                message: format!("notification webhook must be an http(s) URL: {}", url),
            }
            .into());
        }

        let user_agent = format!("library-version-analysis/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, url })
    }

    /// Webhook URL from `ALERT_WEBHOOK_URL`, if set and non-empty
    pub fn url_from_env() -> Option<String> {
        std::env::var(Self::URL_VARIABLE)
            .ok()
            .filter(|url| !url.trim().is_empty())
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn notify(&self, notice: &AlertNotice) -> Result<()> {
        let message = notice.message();
        let body = WebhookMessage {
            text: &message,
            unfurl_links: false,
        };

        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(AnalysisError::RemoteServiceError {
                service: "notification webhook".to_string(),
                details: format!("status code {} {}", status, details.trim()),
            }
            .into());
        }
        Ok(())
    }
}
