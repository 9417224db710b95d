use super::{Owner, OwnerReason};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Parent label used for special cases that do not name one
pub const DEFAULT_SPECIAL_CASE_PARENT: &str = "configured";

/// Owner declared for one library, with an optional pre-resolved reason
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipEntry {
    pub owner: Owner,
    pub reason: Option<OwnerReason>,
}

/// Direct-ownership declarations, in source order
///
/// A later declaration for the same library replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnershipTable {
    entries: Vec<(String, OwnershipEntry)>,
}

impl OwnershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, library: impl Into<String>, owner: Owner, reason: Option<OwnerReason>) {
        let library = library.into();
        let entry = OwnershipEntry { owner, reason };
        match self.entries.iter_mut().find(|(name, _)| *name == library) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((library, entry)),
        }
    }

    pub fn get(&self, library: &str) -> Option<&OwnershipEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == library)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OwnershipEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Configured owner for a library that the ownership table cannot express
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialCaseOwnership {
    owner: Owner,
    parent_label: String,
}

impl SpecialCaseOwnership {
    /// # Errors
    /// Returns a validation error when `owner` is not a concrete team.
    pub fn new(owner: Owner, parent_label: Option<String>) -> Result<Self> {
        if owner.is_unresolved() {
            return Err(AnalysisError::Validation {
                message: format!(
                    "special-case owner must be a concrete team, got '{}'",
                    owner
                ),
            }
            .into());
        }
        Ok(Self {
            owner,
            parent_label: parent_label
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SPECIAL_CASE_PARENT.to_string()),
        })
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn parent_label(&self) -> &str {
        &self.parent_label
    }
}

/// Ownership settings passed explicitly into the merge
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipConfig {
    default_owner: Owner,
    special_cases: BTreeMap<String, SpecialCaseOwnership>,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            default_owner: Owner::Unknown,
            special_cases: BTreeMap::new(),
        }
    }
}

impl OwnershipConfig {
    pub fn new(default_owner: Owner) -> Self {
        Self {
            default_owner,
            special_cases: BTreeMap::new(),
        }
    }

    pub fn with_special_case(mut self, library: impl Into<String>, case: SpecialCaseOwnership) -> Self {
        self.special_cases.insert(library.into(), case);
        self
    }

    pub fn default_owner(&self) -> &Owner {
        &self.default_owner
    }

    /// Special cases sorted by library name
    pub fn special_cases(&self) -> impl Iterator<Item = (&str, &SpecialCaseOwnership)> {
        self.special_cases.iter().map(|(name, case)| (name.as_str(), case))
    }
}
