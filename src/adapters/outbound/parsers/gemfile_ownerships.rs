use crate::shared::error::AnalysisError;
use crate::shared::Result;
use crate::version_analysis::domain::{Owner, OwnershipTable};
use std::path::Path;

const OWNED_GEM_DIRECTIVE: &str = "jgem";

/// Parser for `jgem :team, "gem"` declarations in a Gemfile
///
/// Any other Gemfile content is ignored. Trailing version requirements and
/// options after the gem name are allowed.
pub struct GemfileOwnershipParser;

impl GemfileOwnershipParser {
    pub fn parse(content: &str, path: &Path) -> Result<OwnershipTable> {
        let mut table = OwnershipTable::new();

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            let Some(rest) = trimmed.strip_prefix(OWNED_GEM_DIRECTIVE) else {
                continue;
            };
            // `jgems`, `jgem_helper` and the like are not the directive
            if !rest.starts_with(char::is_whitespace) {
                continue;
            }

            let (owner, gem) = parse_declaration(rest).ok_or_else(|| {
                AnalysisError::MalformedOwnershipTable {
                    path: path.to_path_buf(),
                    details: format!(
                        "line {}: expected `jgem :team, \"gem\"`, found '{}'",
                        index + 1,
                        trimmed
                    ),
                }
            })?;
            table.insert(gem, Owner::parse(owner), None);
        }

        Ok(table)
    }
}

fn parse_declaration(rest: &str) -> Option<(&str, &str)> {
    let (owner, remainder) = rest.split_once(',')?;
    let owner = owner.trim();
    if owner.is_empty() || owner.contains(char::is_whitespace) {
        return None;
    }

    let quoted = remainder.trim_start();
    let quote = quoted.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &quoted[1..];
    let gem = &body[..body.find(quote)?];
    if gem.is_empty() || gem.contains(char::is_whitespace) {
        return None;
    }
    Some((owner, gem))
}
