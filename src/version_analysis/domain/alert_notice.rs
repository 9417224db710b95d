use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Owner, Severity};

/// A vulnerability alert raised recently enough to announce
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertNotice {
    pub library: String,
    pub severity: Severity,
    pub identifiers: Vec<String>,
    /// Owner after resolution, so inherited teams are named too
    pub owner: Owner,
    pub permalink: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AlertNotice {
    /// Plain-text announcement for chat webhooks
    pub fn message(&self) -> String {
        let mut message = format!(
            "⚠️ New vulnerability alert ⚠️\n\nPackage: {}\nSeverity: {}",
            self.library, self.severity
        );
        if !self.identifiers.is_empty() {
            message.push_str(&format!(" ({})", self.identifiers.join(", ")));
        }
        message.push_str(&format!("\n\nOwned by {}", self.owner));
        if let Some(permalink) = &self.permalink {
            message.push('\n');
            message.push_str(permalink);
        }
        message
    }
}
