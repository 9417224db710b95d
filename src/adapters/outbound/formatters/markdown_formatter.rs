use crate::application::read_models::{
    AnalysisReadModel, CycleEdgeView, LibraryView, MetadataView, VulnerabilityView,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::version_analysis::domain::HealthSummary;

const LIBRARY_TABLE_HEADER: &str =
    "| Library | Owner | Reason | Version | Latest | Major | Minor | Patch | Age | Severity |\n";
const LIBRARY_TABLE_SEPARATOR: &str =
    "|---------|-------|--------|---------|--------|-------|-------|-------|-----|----------|\n";

const VULN_TABLE_HEADER: &str = "| Library | Identifier | Severity | State | Advisory |\n";
const VULN_TABLE_SEPARATOR: &str = "|---------|------------|----------|-------|----------|\n";

/// MarkdownFormatter adapter for the human-readable report
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn optional_cell(value: Option<&str>) -> String {
        value.map(Self::escape_cell).unwrap_or_else(|| "-".to_string())
    }

    fn render_header(&self, output: &mut String, metadata: &MetadataView) {
        output.push_str(&format!(
            "# Library Version Report: {} ({})\n\n",
            Self::escape_cell(&metadata.repository),
            metadata.ecosystem
        ));
        output.push_str(&format!(
            "Generated by {} {} at {} (run `{}`)\n\n",
            metadata.tool_name, metadata.tool_version, metadata.timestamp, metadata.run_id
        ));
    }

    fn render_summary(&self, output: &mut String, summary: &HealthSummary) {
        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        let rows: [(&str, String); 10] = [
            ("Score", summary.score.to_string()),
            ("3+ majors behind", summary.three_plus_major.to_string()),
            ("2 majors behind", summary.two_major.to_string()),
            ("1 major behind", summary.one_major.to_string()),
            ("Minor versions behind", summary.minor_only.to_string()),
            ("Patch versions behind", summary.patch_only.to_string()),
            ("Libraries", summary.total_libraries.to_string()),
            ("Library-years", summary.total_age.to_string()),
            ("Vulnerabilities", summary.total_vulnerabilities.to_string()),
            (
                "Unowned, needs attention",
                summary.unowned_needs_attention.to_string(),
            ),
        ];
        for (metric, value) in rows {
            output.push_str(&format!("| {} | {} |\n", metric, value));
        }
        output.push('\n');
    }

    fn render_library_row(output: &mut String, library: &LibraryView) {
        let (major, minor, patch) = match library.drift {
            Some(drift) => (
                drift.major.to_string(),
                drift.minor.to_string(),
                drift.patch.to_string(),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        let reason = match (&library.owner_reason, &library.parent) {
            (Some(reason), Some(parent)) => format!("{} ({})", reason, parent),
            (Some(reason), None) => reason.clone(),
            (None, _) => "-".to_string(),
        };

        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            Self::escape_cell(&library.name),
            Self::escape_cell(&library.owner),
            Self::escape_cell(&reason),
            Self::optional_cell(library.version.as_deref()),
            Self::optional_cell(library.latest_version.as_deref()),
            major,
            minor,
            patch,
            library
                .age
                .map(|age| age.to_string())
                .unwrap_or_else(|| "-".to_string()),
            library
                .severity
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));
    }

    fn render_attention(&self, output: &mut String, model: &AnalysisReadModel) {
        let flagged: Vec<&LibraryView> = model.attention_libraries().collect();
        if flagged.is_empty() {
            return;
        }

        output.push_str("## ⚠️ Unowned Libraries Needing Attention\n\n");
        output.push_str(&format!(
            "**{} {} without an owner crossed an attention threshold.**\n\n",
            flagged.len(),
            if flagged.len() == 1 {
                "library"
            } else {
                "libraries"
            }
        ));
        output.push_str(LIBRARY_TABLE_HEADER);
        output.push_str(LIBRARY_TABLE_SEPARATOR);
        for library in flagged {
            Self::render_library_row(output, library);
        }
        output.push('\n');
    }

    fn render_libraries(&self, output: &mut String, libraries: &[LibraryView]) {
        output.push_str("## Libraries\n\n");
        if libraries.is_empty() {
            output.push_str("*No libraries found*\n\n");
            return;
        }

        output.push_str(LIBRARY_TABLE_HEADER);
        output.push_str(LIBRARY_TABLE_SEPARATOR);
        for library in libraries {
            Self::render_library_row(output, library);
        }
        output.push('\n');
    }

    fn render_vulnerabilities(&self, output: &mut String, vulns: &[VulnerabilityView]) {
        output.push_str("## Vulnerabilities\n\n");
        if vulns.is_empty() {
            output.push_str("*No vulnerability alerts*\n\n");
            return;
        }

        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);
        for vuln in vulns {
            let advisory = match &vuln.url {
                Some(url) => format!("[link]({})", url),
                None => "-".to_string(),
            };
            output.push_str(&format!(
                "| {} | {} | {} | {:?} | {} |\n",
                Self::escape_cell(&vuln.library),
                Self::escape_cell(&vuln.identifier),
                vuln.assigned_severity,
                vuln.state,
                advisory
            ));
        }
        output.push('\n');
    }

    fn render_removed_cycles(&self, output: &mut String, edges: &[CycleEdgeView]) {
        if edges.is_empty() {
            return;
        }

        output.push_str("## Dependency Cycles\n\n");
        output.push_str("These links were dropped to make ownership resolution safe:\n\n");
        for edge in edges {
            output.push_str(&format!("- `{}` → `{}`\n", edge.parent, edge.child));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, model: &AnalysisReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, &model.metadata);
        self.render_summary(&mut output, &model.summary);
        self.render_attention(&mut output, model);
        self.render_libraries(&mut output, &model.libraries);
        self.render_vulnerabilities(&mut output, &model.vulnerabilities);
        self.render_removed_cycles(&mut output, &model.removed_cycle_edges);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version_analysis::domain::{
        AlertState, Ecosystem, EcosystemTotals, Severity, VersionDrift,
    };

    fn library(name: &str, owner: &str, needs_attention: bool) -> LibraryView {
        LibraryView {
            name: name.to_string(),
            owner: owner.to_string(),
            owner_reason: None,
            parent: None,
            version: Some("1.0.0".to_string()),
            version_date: None,
            latest_version: Some("2.0.0".to_string()),
            latest_version_date: None,
            drift: Some(VersionDrift::new(1, 0, 0)),
            age: Some(1.5),
            severity: None,
            needs_attention,
        }
    }

    fn model(libraries: Vec<LibraryView>) -> AnalysisReadModel {
        AnalysisReadModel {
            metadata: MetadataView {
                run_id: "run-1".to_string(),
                timestamp: "2024-01-02T03:04:05Z".to_string(),
                tool_name: "library-version-analysis".to_string(),
                tool_version: "0.1.0".to_string(),
                repository: "mobile".to_string(),
                ecosystem: Ecosystem::Bundler,
            },
            libraries,
            new_versions: vec![],
            vulnerabilities: vec![],
            dependencies: vec![],
            summary: HealthSummary {
                one_major: 1,
                score: 10.0,
                ..Default::default()
            },
            totals: EcosystemTotals::default(),
            removed_cycle_edges: vec![],
        }
    }

    #[test]
    fn test_header_and_summary() {
        let output = MarkdownFormatter::new().format(&model(vec![])).unwrap();

        assert!(output.starts_with("# Library Version Report: mobile (bundler)\n"));
        assert!(output.contains("| Score | 10 |"));
        assert!(output.contains("| 1 major behind | 1 |"));
        assert!(output.contains("*No libraries found*"));
        assert!(output.contains("*No vulnerability alerts*"));
        assert!(!output.contains("Needing Attention"));
        assert!(!output.contains("Dependency Cycles"));
    }

    #[test]
    fn test_library_rows() {
        let mut special = library("actioncable", ":api_platform", false);
        special.owner_reason = Some("configured".to_string());
        special.parent = Some("Rails".to_string());
        let mut unclassified = library("tslib", "unknown", false);
        unclassified.drift = None;
        unclassified.age = None;

        let output = MarkdownFormatter::new()
            .format(&model(vec![special, unclassified]))
            .unwrap();

        assert!(output.contains(
            "| actioncable | :api_platform | configured (Rails) | 1.0.0 | 2.0.0 | 1 | 0 | 0 | 1.5 | - |"
        ));
        assert!(output.contains("| tslib | unknown | - | 1.0.0 | 2.0.0 | - | - | - | - | - |"));
    }

    #[test]
    fn test_attention_section_lists_flagged_only() {
        let output = MarkdownFormatter::new()
            .format(&model(vec![
                library("aasm", "unknown", true),
                library("rails", ":core", false),
            ]))
            .unwrap();

        let attention = output
            .split("## Libraries")
            .next()
            .unwrap();
        assert!(attention.contains("**1 library without an owner crossed an attention threshold.**"));
        assert!(attention.contains("| aasm |"));
        assert!(!attention.contains("| rails |"));
    }

    #[test]
    fn test_vulnerabilities_and_cycles() {
        let mut report = model(vec![]);
        report.vulnerabilities.push(VulnerabilityView {
            library: "nokogiri".to_string(),
            identifier: "GHSA-x | y".to_string(),
            assigned_severity: Severity::Critical,
            state: AlertState::Fixed,
            url: Some("https://github.com/advisories/GHSA-x".to_string()),
            created_at: None,
            fixed_at: None,
        });
        report.removed_cycle_edges.push(CycleEdgeView {
            child: "update-browserslist-db".to_string(),
            parent: "browserslist".to_string(),
        });

        let output = MarkdownFormatter::new().format(&report).unwrap();

        assert!(output.contains(
            "| nokogiri | GHSA-x \\| y | CRITICAL | Fixed | [link](https://github.com/advisories/GHSA-x) |"
        ));
        assert!(output.contains("- `browserslist` → `update-browserslist-db`"));
    }
}
