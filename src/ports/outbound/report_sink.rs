use crate::shared::Result;
use async_trait::async_trait;

/// ReportSink port for publishing a serialized report
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Publishes the JSON payload
    ///
    /// # Errors
    /// Returns an error if the destination rejects or cannot receive it.
    async fn upload(&self, payload: &str) -> Result<()>;
}
