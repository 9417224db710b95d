use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Maximum input file size (100 MB)
/// `npm list --all --json` for large monorepos is big, but never this big.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the symlink itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is missing, a symbolic link, or not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<fs::Metadata> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AnalysisError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::FileReadError {
            path: path.to_path_buf(),
            details: format!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                file_description
            ),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(AnalysisError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    Ok(metadata)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(AnalysisError::FileReadError {
            path: path.to_path_buf(),
            details: format!(
                "Security: file is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
        }
        .into());
    }
    Ok(())
}

/// Validates that a generated report is not older than `max_age`
///
/// Drift reports are produced by a separate tool run, so an old file means
/// the analysis would silently describe a past snapshot.
pub fn validate_freshness(metadata: &fs::Metadata, path: &Path, max_age: Duration) -> Result<()> {
    let modified = metadata.modified().map_err(|e| AnalysisError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read modification time: {}", e),
    })?;

    // A clock skewed into the past yields an error here; treat it as fresh.
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);

    if age > max_age {
        return Err(AnalysisError::StaleReport {
            path: path.to_path_buf(),
            age_minutes: age.as_secs() / 60,
            max_minutes: max_age.as_secs() / 60,
        }
        .into());
    }
    Ok(())
}

/// Reads a file after the regular-file, size and (optional) freshness checks
pub fn read_checked_file(
    path: &Path,
    file_description: &str,
    max_age: Option<Duration>,
) -> Result<String> {
    let metadata = validate_regular_file(path, file_description)?;
    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;
    if let Some(max_age) = max_age {
        validate_freshness(&metadata, path, max_age)?;
    }

    fs::read_to_string(path).map_err(|e| {
        AnalysisError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}
