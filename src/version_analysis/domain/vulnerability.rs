use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Advisory severity as reported by the alert source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Parses a severity label, case-insensitively. `MEDIUM` is an alias of `MODERATE`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Severity::Low),
            "MODERATE" | "MEDIUM" => Some(Severity::Moderate),
            "HIGH" => Some(Severity::High),
            "CRITICAL" => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertState {
    Open,
    Fixed,
}

impl AlertState {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Some(AlertState::Open),
            "FIXED" => Some(AlertState::Fixed),
            _ => None,
        }
    }
}

/// A single vulnerability finding attached to a library
#[derive(Debug, Clone, PartialEq)]
pub struct Vulnerability {
    package: String,
    identifiers: Vec<String>,
    severity: Severity,
    state: AlertState,
    created_at: Option<DateTime<Utc>>,
    fixed_at: Option<DateTime<Utc>>,
    permalink: Option<String>,
}

impl Vulnerability {
    pub fn new(
        package: String,
        identifiers: Vec<String>,
        severity: Severity,
        state: AlertState,
    ) -> Self {
        Self {
            package,
            identifiers,
            severity,
            state,
            created_at: None,
            fixed_at: None,
            permalink: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_fixed_at(mut self, fixed_at: DateTime<Utc>) -> Self {
        self.fixed_at = Some(fixed_at);
        self
    }

    pub fn with_permalink(mut self, permalink: String) -> Self {
        self.permalink = Some(permalink);
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn fixed_at(&self) -> Option<DateTime<Utc>> {
        self.fixed_at
    }

    pub fn permalink(&self) -> Option<&str> {
        self.permalink.as_deref()
    }

    pub fn is_fixed(&self) -> bool {
        self.state == AlertState::Fixed
    }

    /// Selects the headline finding: the first non-fixed entry in source order
    pub fn headline(vulnerabilities: &[Vulnerability]) -> Option<&Vulnerability> {
        vulnerabilities.iter().find(|v| !v.is_fixed())
    }
}
