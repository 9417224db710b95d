use crate::shared::Result;
use crate::version_analysis::domain::AlertNotice;
use async_trait::async_trait;

/// NotificationSink port for announcing newly raised alerts
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one notice
    ///
    /// # Errors
    /// Returns an error if the destination rejects or cannot receive it.
    async fn notify(&self, notice: &AlertNotice) -> Result<()>;
}
