/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a minimal npm project with drift report and ownerships.
fn create_test_project(dir: &std::path::Path) {
    fs::write(
        dir.join("package.json"),
        r#"{
  "name": "storefront",
  "ownerships": { "react": ":frontend" }
}"#,
    )
    .unwrap();
    fs::write(
        dir.join("libyear_report.txt"),
        r#"[
  {"dependency":"react","drift":1.1,"major":1,"minor":0,"patch":0,"available":"18.2.0"},
  {"dependency":"tslib","drift":4.2,"major":1,"minor":3,"patch":0,"available":"2.6.2"}
]"#,
    )
    .unwrap();
}

fn write_config(path: &std::path::Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn parse_report(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

fn library<'a>(report: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    report["libraries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|library| library["name"] == name)
        .unwrap()
}

// ============================================================================
// Auto-discovery
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_special_cases() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            r#"
repository: storefront
special_case_ownerships:
  tslib:
    owner: ":platform"
    parent: TypeScript
"#,
        );

        let output = cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap(), "--fail-on-unowned"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let report = parse_report(&output.stdout);
        let tslib = library(&report, "tslib");
        assert_eq!(tslib["owner"], ":platform");
        assert_eq!(tslib["owner_reason"], "configured");
        assert_eq!(tslib["parent"], "TypeScript");
        assert_eq!(report["summary"]["unowned_needs_attention"], 0);
    }

    #[test]
    fn test_auto_discovery_applies_format() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            "format: markdown\n",
        );

        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with("# Library Version Report:"));
    }

    #[test]
    fn test_no_config_file_runs_normally() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());

        let output = cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap(), "--fail-on-unowned"])
            .output()
            .unwrap();

        // tslib is unowned and one major behind
        assert_eq!(output.status.code(), Some(1));
        let report = parse_report(&output.stdout);
        assert_eq!(library(&report, "react")["owner"], ":frontend");
        assert_eq!(library(&report, "tslib")["owner"], "unknown");
        assert_eq!(report["metadata"]["ecosystem"], "npm");
    }

    #[test]
    fn test_unknown_fields_warn() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            "exclude_packages:\n  - tslib\n",
        );

        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap()])
            .assert()
            .code(0)
            .stderr(predicate::str::contains(
                "Unknown config field 'exclude_packages' will be ignored",
            ));
    }
}

// ============================================================================
// Explicit --config
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_loads_successfully() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        let config_dir = TempDir::new().unwrap();
        let config_path = config_dir.path().join("custom.yml");
        write_config(&config_path, "repository: renamed\ndefault_owner_name: unspecified\n");

        let output = cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap()])
            .arg("--config")
            .arg(&config_path)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let report = parse_report(&output.stdout);
        assert_eq!(report["metadata"]["repository"], "renamed");
    }

    #[test]
    fn test_explicit_config_nonexistent_file_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());

        cargo_bin_cmd!("library-version-analysis")
            .args([
                "-p",
                dir.path().to_str().unwrap(),
                "--config",
                "/nonexistent/custom.yml",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }
}

// ============================================================================
// CLI over config
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_format_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            "format: markdown\n",
        );

        let output = cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap(), "--format", "json"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let report = parse_report(&output.stdout);
        assert_eq!(report["metadata"]["ecosystem"], "npm");
    }

    #[test]
    fn test_cli_repository_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            "repository: from-config\n",
        );

        let output = cargo_bin_cmd!("library-version-analysis")
            .args([
                "-p",
                dir.path().to_str().unwrap(),
                "--repository",
                "from-cli",
            ])
            .output()
            .unwrap();

        let report = parse_report(&output.stdout);
        assert_eq!(report["metadata"]["repository"], "from-cli");
    }
}

// ============================================================================
// Config errors
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_invalid_yaml_syntax_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            "invalid: yaml: [[[broken",
        );

        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_special_case_owner_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            "special_case_ownerships:\n  tslib:\n    owner: \"\"\n",
        );

        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("must not be empty"));
    }

    #[test]
    fn test_unsupported_ecosystem_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("library_version_analysis.yml"),
            "ecosystem: cargo\n",
        );

        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", dir.path().to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("ecosystem 'cargo' is not supported"));
    }
}
