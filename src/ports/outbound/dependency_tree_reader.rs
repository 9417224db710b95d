use crate::shared::Result;
use crate::version_analysis::domain::DependencyListing;
use std::path::Path;

/// DependencyTreeReader port for loading a package manager's dependency listing
pub trait DependencyTreeReader {
    /// Reads the listing at `path`, detecting JSON versus indented text
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or fails the
    /// file security checks.
    fn read_dependency_tree(&self, path: &Path) -> Result<DependencyListing>;
}
