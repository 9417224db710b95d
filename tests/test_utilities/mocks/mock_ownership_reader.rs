use library_version_analysis::prelude::*;
use std::path::Path;

/// Mock OwnershipReader with declarations added one by one
#[derive(Default)]
pub struct MockOwnershipReader {
    table: OwnershipTable,
}

impl MockOwnershipReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, library: &str, owner: &str) -> Self {
        self.table.insert(library, Owner::parse(owner), None);
        self
    }
}

impl OwnershipReader for MockOwnershipReader {
    fn read_ownerships(&self, _ecosystem: Ecosystem, _path: &Path) -> Result<OwnershipTable> {
        Ok(self.table.clone())
    }
}
