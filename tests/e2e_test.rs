/// End-to-end tests for the CLI
use library_version_analysis::prelude::*;
use std::path::PathBuf;

const SAMPLE_PROJECT: &str = "tests/fixtures/sample-project";

// Exit code tests for CLI
mod exit_code_tests {
    use super::SAMPLE_PROJECT;
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", SAMPLE_PROJECT])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("\"repository\": \"sample-project\""));
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("library-version-analysis")
            .arg("--help")
            .assert()
            .code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("library-version-analysis")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 1: unowned libraries need attention and gating is on
    #[test]
    fn test_exit_code_unowned_issues() {
        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", SAMPLE_PROJECT, "--fail-on-unowned"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("1 unowned library needing attention"));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("library-version-analysis")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("library-version-analysis")
            .args(["-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 2: non-existent project path
    #[test]
    fn test_exit_code_nonexistent_path() {
        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Directory does not exist"));
    }

    /// Exit code 2: path is a file, not a directory
    #[test]
    fn test_exit_code_file_not_directory() {
        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", "Cargo.toml"])
            .assert()
            .code(2);
    }

    /// Exit code 3: the drift report is missing
    #[test]
    fn test_exit_code_missing_drift_report() {
        cargo_bin_cmd!("library-version-analysis")
            .args([
                "-p",
                SAMPLE_PROJECT,
                "--drift-report",
                "/nonexistent/libyear_report.txt",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("drift report does not exist"));
    }

    /// Exit code 3: alerts requested without a token
    #[test]
    fn test_exit_code_missing_github_token() {
        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", SAMPLE_PROJECT, "--github-owner", "acme"])
            .env_remove("GITHUB_READ_API_TOKEN")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("GITHUB_READ_API_TOKEN is not set"));
    }

    /// Exit code 3: upload requested without a key
    #[test]
    fn test_exit_code_missing_upload_key() {
        cargo_bin_cmd!("library-version-analysis")
            .args([
                "-p",
                SAMPLE_PROJECT,
                "--upload-url",
                "https://reports.example.com/upload",
            ])
            .env_remove("UPLOAD_KEY")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("UPLOAD_KEY is not set"));
    }
}

mod output_tests {
    use super::SAMPLE_PROJECT;
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_output() {
        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", SAMPLE_PROJECT, "--format", "markdown"])
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with(
                "# Library Version Report: sample-project (npm)",
            ))
            .stdout(predicate::str::contains("| moment | unknown |"))
            .stderr(predicate::str::contains("Generating Markdown report"));
    }

    #[test]
    fn test_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("report.json");

        cargo_bin_cmd!("library-version-analysis")
            .args(["-p", SAMPLE_PROJECT, "-o"])
            .arg(&output)
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty());

        let content = std::fs::read_to_string(&output).unwrap();
        let report: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(report["metadata"]["ecosystem"], "npm");
        assert_eq!(report["summary"]["score"], 12.5);
    }
}

fn sample_request() -> AnalysisRequest {
    let project = PathBuf::from(SAMPLE_PROJECT);
    AnalysisRequest::new(
        "sample-project".to_string(),
        Ecosystem::Npm,
        Some(project.join("npm-list.json")),
        DriftInputs {
            report: project.join("libyear_report.txt"),
            libyear_report: None,
            max_age: None,
        },
        project.join("package.json"),
    )
}

#[tokio::test]
async fn test_e2e_sample_project() {
    let use_case: AnalyzeEcosystemUseCase<_, _, _, _, GitHubAlertClient> =
        AnalyzeEcosystemUseCase::new(
            FileSystemReader::new(),
            FileSystemReader::new(),
            FileSystemReader::new(),
            StderrProgressReporter::new(),
            None,
        );

    let response = use_case.execute(sample_request()).await.unwrap();

    assert_eq!(response.records.len(), 5);
    assert_eq!(response.records["express"].owner(), &Owner::parse(":api_platform"));
    for inherited in ["body-parser", "qs"] {
        let record = &response.records[inherited];
        assert_eq!(record.owner(), &Owner::parse(":api_platform"));
        assert_eq!(
            record.owner_reason(),
            Some(&OwnerReason::Ancestor("express".to_string()))
        );
    }
    assert_eq!(response.records["lodash"].owner(), &Owner::Unknown);
    assert_eq!(response.records["body-parser"].current_version(), Some("1.19.0"));

    let summary = &response.summary;
    assert_eq!(summary.one_major, 1);
    assert_eq!(summary.minor_only, 2);
    assert_eq!(summary.patch_only, 1);
    assert_eq!(summary.score, 12.5);
    assert_eq!(summary.total_age, 8.2);
    assert_eq!(summary.unowned_needs_attention, 1);
}

#[tokio::test]
async fn test_e2e_sample_project_json_report() {
    let use_case: AnalyzeEcosystemUseCase<_, _, _, _, GitHubAlertClient> =
        AnalyzeEcosystemUseCase::new(
            FileSystemReader::new(),
            FileSystemReader::new(),
            FileSystemReader::new(),
            StderrProgressReporter::new(),
            None,
        );

    let response = use_case.execute(sample_request()).await.unwrap();
    let model = AnalysisReadModelBuilder::build(&response);
    let json = JsonFormatter::new().format(&model).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();

    let moment = report["libraries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|library| library["name"] == "moment")
        .unwrap();
    assert_eq!(moment["owner"], "unknown");
    assert_eq!(moment["needs_attention"], true);
    assert_eq!(moment["age"], 3.9);

    let qs = report["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .find(|dependency| dependency["name"] == "qs")
        .unwrap();
    assert_eq!(qs["parents"].as_array().unwrap().len(), 2);
}
