use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean run, a run
/// that found unowned libraries needing attention, and a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis completed (and no unowned issues when gating is on)
    Success = 0,
    /// Unowned libraries needing attention were found and `--fail-on-unowned` was set
    UnownedIssuesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed input, API error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UnownedIssuesDetected => write!(f, "Unowned Issues Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for library version analysis.
///
/// Shape errors (`Malformed*`) are fatal to the ecosystem run: the caller
/// aborts before any graph is resolved or any report is produced.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Malformed dependency tree: {details}\n\n💡 Hint: Regenerate the listing with `npm list --all --json` (or `npm list --all`) and try again")]
    MalformedTree { details: String },

    #[error("Malformed ownership table: {path}\nDetails: {details}\n\n💡 Hint: Check the `ownerships` block in package.json or the `jgem` lines in the Gemfile")]
    MalformedOwnershipTable { path: PathBuf, details: String },

    #[error("Malformed drift report: {path}\nDetails: {details}\n\n💡 Hint: Regenerate the report with `npx libyear --json` or `libyear-bundler`")]
    MalformedDriftReport { path: PathBuf, details: String },

    #[error("Malformed vulnerability alert response\nDetails: {details}\n\n💡 Hint: The alert API may have changed shape; check the token scopes and repository name")]
    MalformedAlertResponse { details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Stale report: {path} is {age_minutes} minute(s) old (maximum {max_minutes})\n\n💡 Hint: Re-run the drift tool before analyzing")]
    StaleReport {
        path: PathBuf,
        age_minutes: u64,
        max_minutes: u64,
    },

    #[error("Missing credential: {name} is not set\n\n💡 Hint: Export {name} or disable the step that needs it")]
    MissingCredential { name: String },

    #[error("Remote service error: {service} returned {details}\n\n💡 Hint: Check network connectivity and credentials")]
    RemoteServiceError { service: String, details: String },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::UnownedIssuesDetected.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::UnownedIssuesDetected),
            "Unowned Issues Detected (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_malformed_tree_display() {
        let error = AnalysisError::MalformedTree {
            details: "line 3: depth jumps from 0 to 2".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Malformed dependency tree"));
        assert!(display.contains("depth jumps"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_malformed_ownership_table_display() {
        let error = AnalysisError::MalformedOwnershipTable {
            path: PathBuf::from("/project/package.json"),
            details: "ownerships must be an object".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("/project/package.json"));
        assert!(display.contains("ownerships must be an object"));
    }

    #[test]
    fn test_stale_report_display() {
        let error = AnalysisError::StaleReport {
            path: PathBuf::from("libyear_report.txt"),
            age_minutes: 42,
            max_minutes: 10,
        };
        let display = format!("{}", error);
        assert!(display.contains("42 minute(s) old"));
        assert!(display.contains("maximum 10"));
    }

    #[test]
    fn test_missing_credential_display() {
        let error = AnalysisError::MissingCredential {
            name: "GITHUB_READ_API_TOKEN".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("GITHUB_READ_API_TOKEN is not set"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = AnalysisError::Validation {
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Validation { .. })
        ));
    }
}
