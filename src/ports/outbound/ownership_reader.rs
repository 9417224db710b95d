use crate::shared::Result;
use crate::version_analysis::domain::{Ecosystem, OwnershipTable};
use std::path::Path;

/// OwnershipReader port for the ecosystem's direct-ownership declarations
///
/// npm projects declare owners in an `ownerships` block of package.json;
/// bundler projects use `jgem :team, "gem"` lines in the Gemfile.
pub trait OwnershipReader {
    /// # Errors
    /// Returns `MalformedOwnershipTable` when the declarations have an
    /// unexpected shape, or a file error when the file cannot be read.
    fn read_ownerships(&self, ecosystem: Ecosystem, path: &Path) -> Result<OwnershipTable>;
}
