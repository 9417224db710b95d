//! Configuration file support for library-version-analysis.
//!
//! Provides YAML-based configuration through `library_version_analysis.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::shared::Result;
use crate::version_analysis::domain::{Owner, OwnershipConfig, SpecialCaseOwnership};

pub const CONFIG_FILENAME: &str = "library_version_analysis.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub repository: Option<String>,
    pub github_owner: Option<String>,
    pub ecosystem: Option<String>,
    pub default_owner_name: Option<String>,
    pub special_case_ownerships: Option<BTreeMap<String, SpecialCaseEntry>>,
    pub dependency_tree: Option<PathBuf>,
    pub drift_report: Option<PathBuf>,
    pub drift_libyear_report: Option<PathBuf>,
    pub ownership_file: Option<PathBuf>,
    pub max_report_age_minutes: Option<u64>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub fixed_alerts_since: Option<String>,
    pub upload_url: Option<String>,
    /// Chat webhook receiving newly raised alerts
    pub notification_webhook_url: Option<String>,
    pub notification_window_hours: Option<u64>,
    pub format: Option<OutputFormat>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A library whose owner is configured rather than declared.
#[derive(Debug, Deserialize)]
pub struct SpecialCaseEntry {
    pub owner: String,
    pub parent: Option<String>,
}

impl ConfigFile {
    /// Builds the ownership settings from `default_owner_name` and
    /// `special_case_ownerships`.
    pub fn ownership_config(&self) -> Result<OwnershipConfig> {
        let default_owner = self
            .default_owner_name
            .as_deref()
            .map(Owner::parse)
            .unwrap_or(Owner::Unknown);

        let mut config = OwnershipConfig::new(default_owner);
        if let Some(ref cases) = self.special_case_ownerships {
            for (library, entry) in cases {
                let case = SpecialCaseOwnership::new(Owner::parse(&entry.owner), entry.parent.clone())
                    .with_context(|| format!("Invalid special_case_ownerships.{}", library))?;
                config = config.with_special_case(library.clone(), case);
            }
        }
        Ok(config)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Parses `fixed_alerts_since`: a plain date means midnight UTC.
pub fn parse_since(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| {
            format!(
                "Invalid date '{}'\n\n💡 Hint: Use YYYY-MM-DD or an RFC 3339 timestamp.",
                value
            )
        })
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref cases) = config.special_case_ownerships {
        for (library, entry) in cases {
            if entry.owner.trim().is_empty() {
                bail!(
                    "Invalid config: special_case_ownerships.{}.owner must not be empty.\n\n\
                     💡 Hint: Each special case needs a concrete team (e.g., \":api_platform\").",
                    library
                );
            }
        }
    }

    if let Some(ref ecosystem) = config.ecosystem {
        if ecosystem.parse::<crate::version_analysis::domain::Ecosystem>().is_err() {
            bail!(
                "Invalid config: ecosystem '{}' is not supported.\n\n\
                 💡 Hint: Use \"npm\", \"bundler\" or \"pip\".",
                ecosystem
            );
        }
    }

    if let Some(ref since) = config.fixed_alerts_since {
        parse_since(since)?;
    }

    if config.notification_window_hours == Some(0) {
        bail!(
            "Invalid config: notification_window_hours must be greater than 0.\n\n\
             💡 Hint: Use 25 to cover a daily run."
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
repository: web
github_owner: acme
ecosystem: npm
default_owner_name: ":unknown"
special_case_ownerships:
  actioncable:
    owner: ":api_platform"
    parent: Rails
  tslib:
    owner: ":frontend"
dependency_tree: npm-list.json
drift_report: libyear_report.txt
ownership_file: package.json
max_report_age_minutes: 30
fixed_alerts_since: "2024-01-01"
upload_url: https://example.com/upload
notification_webhook_url: https://hooks.example.com/T000/B000
notification_window_hours: 48
format: markdown
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.repository.as_deref(), Some("web"));
        assert_eq!(config.github_owner.as_deref(), Some("acme"));
        assert_eq!(config.ecosystem.as_deref(), Some("npm"));
        assert_eq!(config.dependency_tree, Some(PathBuf::from("npm-list.json")));
        assert_eq!(config.max_report_age_minutes, Some(30));
        assert_eq!(config.format, Some(OutputFormat::Markdown));
        assert_eq!(
            config.notification_webhook_url.as_deref(),
            Some("https://hooks.example.com/T000/B000")
        );
        assert_eq!(config.notification_window_hours, Some(48));
        let cases = config.special_case_ownerships.as_ref().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases["actioncable"].parent.as_deref(), Some("Rails"));
        assert!(cases["tslib"].parent.is_none());
    }

    #[test]
    fn test_ownership_config_from_file() {
        let config = ConfigFile {
            default_owner_name: Some(":unspecified".to_string()),
            special_case_ownerships: Some(BTreeMap::from([(
                "actioncable".to_string(),
                SpecialCaseEntry {
                    owner: ":api_platform".to_string(),
                    parent: Some("Rails".to_string()),
                },
            )])),
            ..Default::default()
        };

        let ownership = config.ownership_config().unwrap();
        assert_eq!(ownership.default_owner(), &Owner::Unassigned);
        let (library, case) = ownership.special_cases().next().unwrap();
        assert_eq!(library, "actioncable");
        assert_eq!(case.owner(), &Owner::parse(":api_platform"));
        assert_eq!(case.parent_label(), "Rails");
    }

    #[test]
    fn test_ownership_config_defaults_to_unknown() {
        let ownership = ConfigFile::default().ownership_config().unwrap();
        assert_eq!(ownership.default_owner(), &Owner::Unknown);
        assert_eq!(ownership.special_cases().count(), 0);
    }

    #[test]
    fn test_ownership_config_rejects_sentinel_special_case() {
        let config = ConfigFile {
            special_case_ownerships: Some(BTreeMap::from([(
                "tslib".to_string(),
                SpecialCaseEntry {
                    owner: "unknown".to_string(),
                    parent: None,
                },
            )])),
            ..Default::default()
        };

        let err = format!("{:#}", config.ownership_config().unwrap_err());
        assert!(err.contains("special_case_ownerships.tslib"));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &config_path,
            r#"
ecosystem: bundler
format: json
"#,
        )
        .unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_some());
        let config = config.unwrap();
        assert_eq!(config.ecosystem.as_deref(), Some("bundler"));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_special_case_owner_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
special_case_ownerships:
  actioncable:
    owner: "   "
"#,
        )
        .unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn test_invalid_ecosystem_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "ecosystem: cargo\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("ecosystem 'cargo' is not supported"));
    }

    #[test]
    fn test_zero_notification_window_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "notification_window_hours: 0\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("notification_window_hours must be greater than 0"));
    }

    #[test]
    fn test_pip_ecosystem_accepted() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "ecosystem: poetry\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.ecosystem.as_deref(), Some("poetry"));
    }

    #[test]
    fn test_parse_since() {
        let date = parse_since("2024-03-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let stamp = parse_since("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(stamp.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        assert!(parse_since("last tuesday").is_err());
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
unknown_field: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.repository.is_none());
        assert!(config.ecosystem.is_none());
        assert!(config.special_case_ownerships.is_none());
        assert!(config.format.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
