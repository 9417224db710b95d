mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod shared;
mod version_analysis;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::FileSystemReader;
use adapters::outbound::network::{GitHubAlertClient, UploadClient, WebhookNotifier};
use application::dto::{AnalysisRequest, OutputFormat};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::read_models::AnalysisReadModelBuilder;
use application::use_cases::AnalyzeEcosystemUseCase;
use cli::Args;
use config::{discover_config, load_config_from_path, parse_since, ConfigFile};
use ports::outbound::{DriftInputs, NotificationSink, ProgressReporter, ReportSink};
use shared::error::{AnalysisError, ExitCode};
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use version_analysis::domain::Ecosystem;
use version_analysis::services::NewAlertSelector;

/// Everything one run needs, after CLI flags are laid over the config file
#[derive(Debug)]
struct Settings {
    request: AnalysisRequest,
    format: OutputFormat,
    output: Option<PathBuf>,
    upload_url: Option<String>,
    notify_webhook: Option<String>,
    notification_window: chrono::Duration,
    fail_on_unowned: bool,
}

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            exit_code_for(&e)
        }
    };
    process::exit(exit_code.as_i32());
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments (clap exits with code 2 on bad input)
    let args = Args::parse_args();

    // Validate project directory
    let project_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    validate_project_path(&project_path)?;

    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&project_path)?.unwrap_or_default(),
    };
    let settings = resolve_settings(args, config, &project_path)?;

    // Credentials are checked before any work starts
    let upload_client = match &settings.upload_url {
        Some(url) => Some(UploadClient::from_env(url.clone())?),
        None => None,
    };
    let notifier = match settings
        .notify_webhook
        .clone()
        .or_else(WebhookNotifier::url_from_env)
    {
        Some(url) => Some(WebhookNotifier::new(url)?),
        None => None,
    };
    let mut request = settings.request;
    if notifier.is_some() {
        request = request.with_notification_window(settings.notification_window);
    }

    let progress_reporter = StderrProgressReporter::new();
    let alert_client = if request.github_owner.is_some() {
        Some(GitHubAlertClient::from_env()?.with_progress(progress_reporter.alert_progress()))
    } else {
        None
    };

    // Create use case with injected dependencies
    let use_case = AnalyzeEcosystemUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        FileSystemReader::new(),
        progress_reporter,
        alert_client,
    );

    let response = use_case.execute(request).await?;
    let model = AnalysisReadModelBuilder::build(&response);

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatted_output = FormatterFactory::create(settings.format).format(&model)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output));
    presenter.present(&formatted_output)?;

    if let Some(client) = upload_client {
        let payload = FormatterFactory::create_upload().format(&model)?;
        client.upload(&payload).await?;
        use_case
            .progress_reporter()
            .report_completion(&format!("📤 Uploaded report to {}", client.url()));
    }

    if let Some(notifier) = &notifier {
        for notice in &response.new_alerts {
            notifier.notify(notice).await?;
        }
        if !response.new_alerts.is_empty() {
            use_case.progress_reporter().report_completion(&format!(
                "🔔 Sent {} new-alert notification(s)",
                response.new_alerts.len()
            ));
        }
    }

    if settings.fail_on_unowned && response.has_unowned_issues() {
        use_case.progress_reporter().report_warning(&format!(
            "{} unowned librar{} needing attention",
            response.summary.unowned_needs_attention,
            if response.summary.unowned_needs_attention == 1 {
                "y"
            } else {
                "ies"
            }
        ));
        return Ok(ExitCode::UnownedIssuesDetected);
    }

    Ok(ExitCode::Success)
}

/// Usage mistakes exit with 2, everything else with 3
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<AnalysisError>() {
        Some(AnalysisError::Validation { .. }) | Some(AnalysisError::InvalidProjectPath { .. }) => {
            ExitCode::InvalidArguments
        }
        _ => ExitCode::ApplicationError,
    }
}

/// Lays CLI flags over the config file and fills in per-ecosystem defaults.
///
/// Paths from the config file and the defaults are relative to the project
/// directory; paths given on the command line are used as given.
fn resolve_settings(args: Args, config: ConfigFile, project_path: &Path) -> Result<Settings> {
    let ecosystem = match (args.ecosystem, config.ecosystem.as_deref()) {
        (Some(ecosystem), _) => ecosystem,
        (None, Some(name)) => name
            .parse::<Ecosystem>()
            .map_err(|message| AnalysisError::Validation { message })?,
        (None, None) => detect_ecosystem(project_path)?,
    };

    let in_project = |path: PathBuf| project_path.join(path);

    let repository = match args.repository.or_else(|| config.repository.clone()) {
        Some(name) => name,
        None => repository_name(project_path)?,
    };

    // pip never reads its report or ownership file; the defaults only fill the request
    let (default_report, default_ownership_file) = match ecosystem {
        Ecosystem::Npm => ("libyear_report.txt", "package.json"),
        Ecosystem::Bundler => ("libyear_versions.txt", "Gemfile"),
        Ecosystem::Pip => ("libyear_report.txt", "pyproject.toml"),
    };

    let drift = DriftInputs {
        report: args.drift_report.unwrap_or_else(|| {
            in_project(
                config
                    .drift_report
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(default_report)),
            )
        }),
        libyear_report: args
            .libyear_report
            .or_else(|| config.drift_libyear_report.clone().map(in_project)),
        max_age: args
            .max_report_age
            .or(config.max_report_age_minutes)
            .map(|minutes| Duration::from_secs(minutes * 60)),
    };

    let dependency_tree = args
        .dependency_tree
        .or_else(|| config.dependency_tree.clone().map(in_project))
        .or_else(|| default_dependency_tree(ecosystem, project_path));
    let ownership_file = args.ownership_file.unwrap_or_else(|| {
        in_project(
            config
                .ownership_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_ownership_file)),
        )
    });

    let mut request = AnalysisRequest::new(repository, ecosystem, dependency_tree, drift, ownership_file)
        .with_ownership_config(config.ownership_config()?);

    if let Some(owner) = args.github_owner.or_else(|| config.github_owner.clone()) {
        let fixed_since = match args.fixed_since.or_else(|| config.fixed_alerts_since.clone()) {
            Some(value) => Some(parse_since(&value)?),
            None => None,
        };
        request = request.with_alerts(owner, fixed_since);
    }

    Ok(Settings {
        request,
        format: args.format.or(config.format).unwrap_or_default(),
        output: args.output,
        upload_url: args.upload_url.or(config.upload_url),
        notify_webhook: args.notify_webhook.or(config.notification_webhook_url),
        notification_window: chrono::Duration::hours(
            args.notify_window_hours
                .or(config.notification_window_hours)
                .map(|hours| hours as i64)
                .unwrap_or(NewAlertSelector::DEFAULT_WINDOW_HOURS),
        ),
        fail_on_unowned: args.fail_on_unowned,
    })
}

/// Bundler projects carry their dependency graph in Gemfile.lock
fn default_dependency_tree(ecosystem: Ecosystem, project_path: &Path) -> Option<PathBuf> {
    let lockfile = project_path.join("Gemfile.lock");
    (ecosystem == Ecosystem::Bundler && lockfile.is_file()).then_some(lockfile)
}

fn detect_ecosystem(project_path: &Path) -> Result<Ecosystem> {
    if project_path.join("package.json").is_file() {
        Ok(Ecosystem::Npm)
    } else if project_path.join("Gemfile").is_file() {
        Ok(Ecosystem::Bundler)
    } else if project_path.join("poetry.lock").is_file()
        || project_path.join("pyproject.toml").is_file()
    {
        Ok(Ecosystem::Pip)
    } else {
        Err(AnalysisError::Validation {
            message: format!(
                "cannot detect the ecosystem of {} (no package.json, Gemfile or pyproject.toml); pass --ecosystem",
                project_path.display()
            ),
        }
        .into())
    }
}

fn repository_name(project_path: &Path) -> Result<String> {
    let canonical = project_path
        .canonicalize()
        .map_err(|e| AnalysisError::InvalidProjectPath {
            path: project_path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        })?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            AnalysisError::Validation {
                message: "cannot derive a repository name from the project path; pass --repository"
                    .to_string(),
            }
            .into()
        })
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| AnalysisError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
