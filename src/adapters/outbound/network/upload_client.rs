use crate::ports::outbound::ReportSink;
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// UploadClient adapter that POSTs the JSON report to a collection endpoint
///
/// The endpoint authenticates with an `X-Upload-Key` header.
pub struct UploadClient {
    client: reqwest::Client,
    url: String,
    key: String,
}

impl UploadClient {
    const TIMEOUT_SECONDS: u64 = 30;
    pub const KEY_VARIABLE: &'static str = "UPLOAD_KEY";
    pub const KEY_HEADER: &'static str = "X-Upload-Key";

    pub fn new(url: String, key: String) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(AnalysisError::MissingCredential {
                name: Self::KEY_VARIABLE.to_string(),
            }
            .into());
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(AnalysisError::Validation {
                message: format!("upload URL must be http(s): {}", url),
            }
            .into());
        }

        let user_agent = format!("library-version-analysis/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, url, key })
    }

    /// Creates a client with the key from `UPLOAD_KEY`
    pub fn from_env(url: String) -> Result<Self> {
        Self::new(url, std::env::var(Self::KEY_VARIABLE).unwrap_or_default())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportSink for UploadClient {
    async fn upload(&self, payload: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .header(Self::KEY_HEADER, &self.key)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::RemoteServiceError {
                service: "upload endpoint".to_string(),
                details: format!("status code {} {}", status, body.trim()),
            }
            .into());
        }
        Ok(())
    }
}
