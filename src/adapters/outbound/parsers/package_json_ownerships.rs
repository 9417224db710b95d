use crate::shared::error::AnalysisError;
use crate::shared::Result;
use crate::version_analysis::domain::{Owner, OwnerReason, OwnershipTable};
use serde_json::Value;
use std::path::Path;

/// Parser for the `ownerships` block of package.json
///
/// Entries map a package to a team token, or to an object carrying a
/// pre-resolved reason:
///
/// ```json
/// "ownerships": {
///   "@apollo/client": ":api_platform",
///   "tslib": { "owner": ":core", "reason": "@apollo/client" }
/// }
/// ```
///
/// A package.json without the block yields an empty table.
pub struct PackageJsonOwnershipParser;

impl PackageJsonOwnershipParser {
    pub fn parse(content: &str, path: &Path) -> Result<OwnershipTable> {
        let malformed = |details: String| AnalysisError::MalformedOwnershipTable {
            path: path.to_path_buf(),
            details,
        };

        let document: Value = serde_json::from_str(content)
            .map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

        let mut table = OwnershipTable::new();
        let ownerships = match document.get("ownerships") {
            None | Some(Value::Null) => return Ok(table),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(malformed("ownerships must be an object".to_string()).into()),
        };

        for (package, declaration) in ownerships {
            match declaration {
                Value::String(owner) => table.insert(package.as_str(), Owner::parse(owner), None),
                Value::Object(entry) => {
                    let owner = entry.get("owner").and_then(Value::as_str).ok_or_else(|| {
                        malformed(format!("ownership of '{}' needs a string owner", package))
                    })?;
                    let reason = entry
                        .get("reason")
                        .and_then(Value::as_str)
                        .map(parse_reason);
                    table.insert(package.as_str(), Owner::parse(owner), reason);
                }
                _ => {
                    return Err(malformed(format!(
                        "ownership of '{}' must be a string or an object",
                        package
                    ))
                    .into())
                }
            }
        }

        Ok(table)
    }
}

fn parse_reason(reason: &str) -> OwnerReason {
    match reason {
        "assigned" => OwnerReason::Assigned,
        "configured" => OwnerReason::Configured,
        ancestor => OwnerReason::Ancestor(ancestor.to_string()),
    }
}
