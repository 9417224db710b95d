use crate::shared::error::AnalysisError;
use crate::shared::Result;
use crate::version_analysis::domain::{DriftRecord, DriftReport, DriftSourceKind, VersionDrift};
use chrono::NaiveDate;
use std::path::Path;

/// Ruby itself shows up in libyear-bundler output but is not a gem
const RUBY_ENTRY: &str = "ruby";

/// Parser for `libyear-bundler --versions` and `--libyear` text output
///
/// A versions line reads
/// `name current current_date latest latest_date [major, minor, patch]`;
/// a libyear line ends in the age instead of the bracketed triple.
/// Summary lines ("Total releases behind", "System is N libyears behind")
/// are skipped, totals are recomputed from the lines.
pub struct BundlerLibyearParser;

impl BundlerLibyearParser {
    pub fn parse(
        versions: &str,
        versions_path: &Path,
        libyear: Option<(&str, &Path)>,
    ) -> Result<DriftReport> {
        let mut records = Self::parse_versions(versions, versions_path)?;
        if let Some((content, _)) = libyear {
            Self::apply_ages(&mut records, content);
        }
        Ok(DriftReport::new(DriftSourceKind::BundlerLibyear, records))
    }

    fn parse_versions(content: &str, path: &Path) -> Result<Vec<DriftRecord>> {
        let mut records = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let Some((columns, drift)) = line.split_once('[') else {
                continue;
            };

            let malformed = |details: &str| AnalysisError::MalformedDriftReport {
                path: path.to_path_buf(),
                details: format!("line {}: {}", index + 1, details),
            };

            let columns: Vec<&str> = columns.split_whitespace().collect();
            let &[name, current, current_date, latest, latest_date] = columns.as_slice() else {
                return Err(malformed("expected five columns before the drift triple").into());
            };
            if name == RUBY_ENTRY {
                continue;
            }

            let drift = drift
                .split_once(']')
                .map(|(inner, _)| inner)
                .ok_or_else(|| malformed("unterminated drift triple"))?;
            let counts = drift
                .split(',')
                .map(|n| n.trim().parse::<u32>())
                .collect::<std::result::Result<Vec<u32>, _>>()
                .map_err(|_| malformed("drift triple must hold integers"))?;
            let &[major, minor, patch] = counts.as_slice() else {
                return Err(malformed("drift triple must have three entries").into());
            };

            let mut record = DriftRecord::new(name, VersionDrift::new(major, minor, patch));
            record.current_version = Some(current.to_string());
            record.current_version_date = parse_date(current_date);
            record.latest_version = Some(latest.to_string());
            record.latest_version_date = parse_date(latest_date);
            records.push(record);
        }

        Ok(records)
    }

    /// Sets raw ages from the `--libyear` report on matching records.
    /// Gems missing from the versions report are ignored.
    fn apply_ages(records: &mut [DriftRecord], content: &str) {
        for line in content.lines() {
            let columns: Vec<&str> = line.split_whitespace().collect();
            let &[name, _, _, _, _, age] = columns.as_slice() else {
                continue;
            };
            let Ok(age) = age.parse::<f64>() else {
                continue;
            };
            if let Some(record) = records.iter_mut().find(|r| r.name == name) {
                record.age = Some(age);
            }
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSIONS: &str = "\
      packwerk         1.0.3     2018-01-25          1.1.0     2020-11-12      [0, 1, 0]
         aasm          4.1.1     2020-08-11          5.2.0     2021-05-02      [1, 0, 0]
         ruby          2.7.2     2020-10-02          3.1.1     2022-02-18      [1, 1, 2]
  actioncable        6.0.3.5     2021-02-10        7.0.2.2     2022-02-11      [1, 0, 0]
Total releases behind: 4
Major, minor, patch versions behind: 3, 1, 0
";

    const LIBYEAR: &str = "\
     packwerk          1.0.3     2018-01-25          1.1.0     2020-11-12       2.8
         aasm          4.1.1     2020-08-11          5.2.0     2021-05-02       0.736
  actioncable        6.0.3.5     2021-02-10        7.0.2.2     2022-02-11       1.0
System is 4.5 libyears behind
";

    #[test]
    fn test_parse_versions_and_ages() {
        let report = BundlerLibyearParser::parse(
            VERSIONS,
            Path::new("libyear_versions.txt"),
            Some((LIBYEAR, Path::new("libyear_libyear.txt"))),
        )
        .unwrap();

        assert_eq!(report.source(), DriftSourceKind::BundlerLibyear);
        assert_eq!(report.records().len(), 3);

        let packwerk = &report.records()[0];
        assert_eq!(packwerk.name, "packwerk");
        assert_eq!(packwerk.current_version.as_deref(), Some("1.0.3"));
        assert_eq!(packwerk.latest_version.as_deref(), Some("1.1.0"));
        assert_eq!(
            packwerk.current_version_date,
            NaiveDate::from_ymd_opt(2018, 1, 25)
        );
        assert_eq!(packwerk.drift, VersionDrift::new(0, 1, 0));
        assert_eq!(packwerk.age, Some(2.8));

        assert_eq!(report.records()[1].age, Some(0.736));
    }

    #[test]
    fn test_ruby_is_skipped() {
        let report =
            BundlerLibyearParser::parse(VERSIONS, Path::new("versions.txt"), None).unwrap();
        assert!(report.records().iter().all(|r| r.name != "ruby"));
    }

    #[test]
    fn test_without_libyear_report_ages_are_missing() {
        let report =
            BundlerLibyearParser::parse(VERSIONS, Path::new("versions.txt"), None).unwrap();
        assert!(report.records().iter().all(|r| r.age.is_none()));
    }

    #[test]
    fn test_malformed_drift_triple() {
        let content = "aasm 4.1.1 2020-08-11 5.2.0 2021-05-02 [1, x, 0]\n";
        let err = BundlerLibyearParser::parse(content, Path::new("versions.txt"), None)
            .unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::MalformedDriftReport { .. })
        ));
    }

    #[test]
    fn test_missing_columns_is_malformed() {
        let content = "aasm 4.1.1 [1, 0, 0]\n";
        assert!(BundlerLibyearParser::parse(content, Path::new("versions.txt"), None).is_err());
    }
}
