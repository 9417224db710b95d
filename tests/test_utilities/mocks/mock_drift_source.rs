use library_version_analysis::prelude::*;

/// Mock DriftSource returning a fixed report
pub struct MockDriftSource {
    report: DriftReport,
}

impl MockDriftSource {
    pub fn new(source: DriftSourceKind) -> Self {
        Self {
            report: DriftReport::new(source, Vec::new()),
        }
    }

    pub fn with_library(
        self,
        name: &str,
        current: &str,
        latest: &str,
        drift: VersionDrift,
        age: f64,
    ) -> Self {
        let mut record = DriftRecord::new(name, drift);
        record.current_version = Some(current.to_string());
        record.latest_version = Some(latest.to_string());
        record.age = Some(age);

        let source = self.report.source();
        let mut records = self.report.into_records();
        records.push(record);
        Self {
            report: DriftReport::new(source, records),
        }
    }
}

impl DriftSource for MockDriftSource {
    fn read_drift(&self, _ecosystem: Ecosystem, _inputs: &DriftInputs) -> Result<DriftReport> {
        Ok(self.report.clone())
    }
}
