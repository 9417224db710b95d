/// Network adapters for external API calls
mod github_client;
mod upload_client;
mod webhook_notifier;

pub use github_client::GitHubAlertClient;
pub use upload_client::UploadClient;
pub use webhook_notifier::WebhookNotifier;
