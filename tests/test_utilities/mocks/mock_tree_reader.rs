use library_version_analysis::prelude::*;
use std::path::Path;

/// Mock DependencyTreeReader returning a fixed listing
pub struct MockTreeReader {
    listing: DependencyListing,
}

impl MockTreeReader {
    pub fn text(content: &str) -> Self {
        Self {
            listing: DependencyListing::Text(content.to_string()),
        }
    }

    pub fn json(content: &str) -> Self {
        Self {
            listing: DependencyListing::Json(content.to_string()),
        }
    }

    pub fn gemfile_lock(content: &str) -> Self {
        Self {
            listing: DependencyListing::GemfileLock(content.to_string()),
        }
    }
}

impl DependencyTreeReader for MockTreeReader {
    fn read_dependency_tree(&self, _path: &Path) -> Result<DependencyListing> {
        Ok(self.listing.clone())
    }
}
