use crate::shared::error::AnalysisError;
use crate::shared::Result;
use crate::version_analysis::domain::{DependencyGraph, DependencyListing, NodeId};
use crate::version_analysis::policies::VersionSpan;
use serde::Deserialize;
use serde_json::Value;

const UNMET_OPTIONAL_MARKER: &str = "UNMET OPTIONAL DEPENDENCY";
const UNMET_MARKER: &str = "UNMET DEPENDENCY ";
const EMPTY_MARKER: &str = "(empty)";
const NPM_ALIAS_PREFIX: &str = "npm:";

const LOCK_SPECS_HEADER: &str = "specs:";
const LOCK_SPEC_INDENT: usize = 4;
const LOCK_DEPENDENCY_INDENT: usize = 6;

/// GraphImporter service for flattening a nested dependency listing
///
/// Every occurrence of a library name collapses into one node whose parents
/// are all the libraries that depend on it anywhere in the tree, in
/// first-seen order. Both walks use an explicit stack so arbitrarily deep
/// trees import without recursion.
pub struct GraphImporter;

impl GraphImporter {
    pub fn import(listing: &DependencyListing) -> Result<DependencyGraph> {
        match listing {
            DependencyListing::Json(content) => Self::import_json(content),
            DependencyListing::Text(content) => Self::import_text(content),
            DependencyListing::GemfileLock(content) => Self::import_gemfile_lock(content),
        }
    }

    /// Imports an `npm list --all --json` document
    ///
    /// # Errors
    /// Returns `MalformedTree` for invalid JSON, a non-object root, subtree
    /// or `dependencies` field, or a non-string `version`.
    pub fn import_json(content: &str) -> Result<DependencyGraph> {
        let mut deserializer = serde_json::Deserializer::from_str(content);
        deserializer.disable_recursion_limit();
        let document = Value::deserialize(&mut deserializer)
            .and_then(|value| deserializer.end().map(|_| value))
            .map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

        let root = document
            .as_object()
            .ok_or_else(|| malformed("root must be an object".to_string()))?;

        let mut graph = DependencyGraph::new();
        let top_level = match root.get("dependencies") {
            None | Some(Value::Null) => return Ok(graph),
            Some(value) => dependencies_of(value, "<root>")?,
        };

        let mut stack: Vec<(&str, &Value, Option<NodeId>)> = top_level
            .iter()
            .rev()
            .map(|(name, subtree)| (name.as_str(), subtree, None))
            .collect();

        while let Some((name, subtree, parent)) = stack.pop() {
            let entry = subtree
                .as_object()
                .ok_or_else(|| malformed(format!("dependency '{}' must be an object", name)))?;

            let id = graph.ensure_node(name);
            if let Some(parent) = parent {
                graph.add_parent(id, parent);
            }

            match entry.get("version") {
                None | Some(Value::Null) => {}
                Some(Value::String(version)) => fold_version(&mut graph, id, version),
                Some(_) => {
                    return Err(malformed(format!(
                        "version of '{}' must be a string",
                        name
                    )))
                }
            }

            if let Some(children) = entry.get("dependencies") {
                if children.is_null() {
                    continue;
                }
                let children = dependencies_of(children, name)?;
                stack.extend(
                    children
                        .iter()
                        .rev()
                        .map(|(child, subtree)| (child.as_str(), subtree, Some(id))),
                );
            }
        }

        Ok(graph)
    }

    /// Imports indented `npm list --all` text (unicode or ASCII connectors)
    ///
    /// # Errors
    /// Returns `MalformedTree` when a line skips a nesting level, has no tree
    /// connector after the project line, or lacks a `name@version` entry.
    pub fn import_text(content: &str) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        let mut path: Vec<NodeId> = Vec::new();
        let mut seen_project_line = false;

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            if line.trim().is_empty() || line.contains(UNMET_OPTIONAL_MARKER) {
                continue;
            }

            let Some((depth, rest)) = split_tree_prefix(line) else {
                if !seen_project_line {
                    seen_project_line = true;
                    continue;
                }
                return Err(malformed(format!(
                    "line {}: missing tree connector: '{}'",
                    line_number,
                    line.trim()
                )));
            };

            if rest.trim() == EMPTY_MARKER {
                continue;
            }

            if depth > path.len() {
                return Err(malformed(format!(
                    "line {}: depth jumps from {} to {}",
                    line_number,
                    path.len().saturating_sub(1),
                    depth
                )));
            }

            let (name, version) = parse_entry(rest).ok_or_else(|| {
                malformed(format!(
                    "line {}: expected name@version, found '{}'",
                    line_number,
                    rest.trim()
                ))
            })?;

            path.truncate(depth);
            let id = graph.ensure_node(name);
            if let Some(parent) = path.last() {
                graph.add_parent(id, *parent);
            }
            fold_version(&mut graph, id, version);
            path.push(id);
        }

        Ok(graph)
    }

    /// Imports the `specs:` sections of a `Gemfile.lock`
    ///
    /// Each spec line (`name (version)`) becomes a node, and each dependency
    /// line beneath it makes that spec a parent of the named gem. Sections
    /// without specs (`PLATFORMS`, `DEPENDENCIES`, ...) are ignored.
    ///
    /// # Errors
    /// Returns `MalformedTree` when a spec line has no `(version)` or a
    /// dependency line appears before any spec.
    pub fn import_gemfile_lock(content: &str) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        let mut in_specs = false;
        let mut current: Option<NodeId> = None;

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                in_specs = false;
                continue;
            }

            let indent = line.len() - line.trim_start_matches(' ').len();
            if indent == 0 {
                in_specs = false;
                current = None;
                continue;
            }
            if trimmed == LOCK_SPECS_HEADER {
                in_specs = true;
                continue;
            }
            if !in_specs {
                continue;
            }

            match indent {
                LOCK_SPEC_INDENT => {
                    let (name, version) = parse_lock_spec(trimmed).ok_or_else(|| {
                        malformed(format!(
                            "line {}: expected 'name (version)', found '{}'",
                            line_number, trimmed
                        ))
                    })?;
                    let id = graph.ensure_node(name);
                    fold_version(&mut graph, id, version);
                    current = Some(id);
                }
                LOCK_DEPENDENCY_INDENT => {
                    let parent = current.ok_or_else(|| {
                        malformed(format!(
                            "line {}: dependency '{}' outside of a spec",
                            line_number, trimmed
                        ))
                    })?;
                    let name = trimmed.split_whitespace().next().unwrap_or(trimmed);
                    let child = graph.ensure_node(name);
                    graph.add_parent(child, parent);
                }
                _ => {}
            }
        }

        Ok(graph)
    }
}

fn malformed(details: String) -> anyhow::Error {
    AnalysisError::MalformedTree { details }.into()
}

fn dependencies_of<'a>(
    value: &'a Value,
    owner: &str,
) -> Result<&'a serde_json::Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(format!("dependencies of '{}' must be an object", owner)))
}

fn fold_version(graph: &mut DependencyGraph, id: NodeId, version: &str) {
    let span = VersionSpan::fold(graph.node(id).version(), version);
    graph.set_version(id, span);
}

/// Splits a listing line into its depth and the text after the connector.
/// Returns `None` when the line has no connector.
fn split_tree_prefix(line: &str) -> Option<(usize, &str)> {
    let mut prefix_width = 0;
    for (offset, c) in line.char_indices() {
        match c {
            '│' | '|' | ' ' => prefix_width += 1,
            '├' | '└' | '+' | '`' => {
                let rest = line[offset + c.len_utf8()..]
                    .trim_start_matches(['─', '┬', '┐', '-', ' ']);
                return Some((prefix_width / 2, rest));
            }
            _ => return None,
        }
    }
    None
}

/// Parses `name@version` followed by optional markers (`deduped`, `extraneous`, ...)
fn parse_entry(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.strip_prefix(UNMET_MARKER).unwrap_or(rest);
    let token = rest.split_whitespace().next()?;
    // Scoped packages start with '@', so the separator is the first '@' past index 0.
    let at = version_separator(token)?;
    let (name, mut version) = (&token[..at], &token[at + 1..]);
    // Aliases list as `alias@npm:real@version`; the alias is the key.
    if let Some(target) = version.strip_prefix(NPM_ALIAS_PREFIX) {
        version = &target[version_separator(target)? + 1..];
    }
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name, version))
}

fn version_separator(token: &str) -> Option<usize> {
    token
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '@')
        .map(|(at, _)| at)
}

/// Parses a lockfile spec line: `rack (2.2.8)` or `nokogiri (1.15.4-x86_64-linux)`
fn parse_lock_spec(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = line.split_once(' ')?;
    let version = rest.trim().strip_prefix('(')?.strip_suffix(')')?;
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name, version))
}
