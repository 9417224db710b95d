use chrono::NaiveDate;
use serde::Serialize;

/// Number of major/minor/patch releases a pinned version is behind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VersionDrift {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionDrift {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0
    }
}

/// Which drift tool produced a report; decides age rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftSourceKind {
    /// `npx libyear --json`
    NpmLibyear,
    /// `libyear-bundler --versions` + `--libyear`
    BundlerLibyear,
    /// No drift tool; the ecosystem is covered by alerts alone
    AlertsOnly,
}

impl DriftSourceKind {
    /// Decimal places kept for per-library ages and totals
    pub fn precision(&self) -> i32 {
        match self {
            DriftSourceKind::NpmLibyear => 1,
            DriftSourceKind::BundlerLibyear | DriftSourceKind::AlertsOnly => 2,
        }
    }

    /// Rounds one library's raw age.
    ///
    /// npm ages are pre-rounded to two places before the final rounding, so
    /// `0.96` lands on `1.0` the same way the libyear tool prints it.
    pub fn round_age(&self, raw: f64) -> f64 {
        match self {
            DriftSourceKind::NpmLibyear => round_to(round_to(raw, 2), 1),
            DriftSourceKind::BundlerLibyear | DriftSourceKind::AlertsOnly => round_to(raw, 2),
        }
    }

    /// Rounds an accumulated raw total once
    pub fn round_total(&self, raw_total: f64) -> f64 {
        round_to(raw_total, self.precision())
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// One library line from a drift tool
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DriftRecord {
    pub name: String,
    pub current_version: Option<String>,
    pub current_version_date: Option<NaiveDate>,
    pub latest_version: Option<String>,
    pub latest_version_date: Option<NaiveDate>,
    pub drift: VersionDrift,
    /// Raw, unrounded library-years
    pub age: Option<f64>,
}

impl DriftRecord {
    pub fn new(name: impl Into<String>, drift: VersionDrift) -> Self {
        Self {
            name: name.into(),
            drift,
            ..Default::default()
        }
    }
}

/// Output of one drift tool run
#[derive(Debug, Clone, PartialEq)]
pub struct DriftReport {
    source: DriftSourceKind,
    records: Vec<DriftRecord>,
}

impl DriftReport {
    pub fn new(source: DriftSourceKind, records: Vec<DriftRecord>) -> Self {
        Self { source, records }
    }

    pub fn empty(source: DriftSourceKind) -> Self {
        Self::new(source, Vec::new())
    }

    pub fn source(&self) -> DriftSourceKind {
        self.source
    }

    pub fn records(&self) -> &[DriftRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DriftRecord> {
        self.records
    }
}

/// Totals for one ecosystem snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EcosystemTotals {
    pub total_age: f64,
    pub total_releases: usize,
    pub total_major: u64,
    pub total_minor: u64,
    pub total_patch: u64,
    pub total_vulnerabilities: usize,
}
