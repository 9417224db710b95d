use super::{DriftRecord, Owner, OwnerReason, VersionDrift, Vulnerability};
use chrono::NaiveDate;

/// LibraryRecord entity: everything known about one library in a snapshot
///
/// Owner and owner reason change during resolution; the remaining fields are
/// set once while merging sources.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryRecord {
    name: String,
    owner: Owner,
    owner_reason: Option<OwnerReason>,
    parent_label: Option<String>,
    current_version: Option<String>,
    current_version_date: Option<NaiveDate>,
    latest_version: Option<String>,
    latest_version_date: Option<NaiveDate>,
    drift: Option<VersionDrift>,
    age: Option<f64>,
    vulnerabilities: Vec<Vulnerability>,
}

impl LibraryRecord {
    /// A record with no drift classification and no versions
    pub fn new(name: impl Into<String>, owner: Owner) -> Self {
        Self {
            name: name.into(),
            owner,
            owner_reason: None,
            parent_label: None,
            current_version: None,
            current_version_date: None,
            latest_version: None,
            latest_version_date: None,
            drift: None,
            age: None,
            vulnerabilities: Vec::new(),
        }
    }

    /// A record classified as fully up to date (zero drift, zero age)
    pub fn zero_drift(name: impl Into<String>, owner: Owner) -> Self {
        let mut record = Self::new(name, owner);
        record.drift = Some(VersionDrift::default());
        record.age = Some(0.0);
        record
    }

    /// A record seeded from a drift line. `age` is the already-rounded value.
    pub fn from_drift(drift: &DriftRecord, owner: Owner, age: Option<f64>) -> Self {
        let mut record = Self::new(drift.name.clone(), owner);
        record.current_version = drift.current_version.clone();
        record.current_version_date = drift.current_version_date;
        record.latest_version = drift.latest_version.clone();
        record.latest_version_date = drift.latest_version_date;
        record.drift = Some(drift.drift);
        record.age = age;
        record
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn owner_reason(&self) -> Option<&OwnerReason> {
        self.owner_reason.as_ref()
    }

    /// Display label of the synthetic parent for special-case ownership
    pub fn parent_label(&self) -> Option<&str> {
        self.parent_label.as_deref()
    }

    pub fn current_version(&self) -> Option<&str> {
        self.current_version.as_deref()
    }

    pub fn current_version_date(&self) -> Option<NaiveDate> {
        self.current_version_date
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.latest_version.as_deref()
    }

    pub fn latest_version_date(&self) -> Option<NaiveDate> {
        self.latest_version_date
    }

    /// `None` when no drift source classified this library
    pub fn drift(&self) -> Option<VersionDrift> {
        self.drift
    }

    pub fn age(&self) -> Option<f64> {
        self.age
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn headline_vulnerability(&self) -> Option<&Vulnerability> {
        Vulnerability::headline(&self.vulnerabilities)
    }

    pub fn has_newer_version(&self) -> bool {
        self.drift.is_some_and(|d| !d.is_zero())
    }

    pub fn set_owner(&mut self, owner: Owner, reason: Option<OwnerReason>) {
        self.owner = owner;
        self.owner_reason = reason;
    }

    pub fn set_parent_label(&mut self, label: impl Into<String>) {
        self.parent_label = Some(label.into());
    }

    /// Fills the current version only when no source has set it yet
    pub fn fill_current_version(&mut self, version: &str) {
        if self.current_version.as_deref().is_none_or(str::is_empty) {
            self.current_version = Some(version.to_string());
        }
    }

    pub fn push_vulnerability(&mut self, vulnerability: Vulnerability) {
        self.vulnerabilities.push(vulnerability);
    }
}
