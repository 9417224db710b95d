use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::version_analysis::domain::Ecosystem;

/// Report version drift, vulnerabilities and ownership for a repository's libraries
#[derive(Parser, Debug)]
#[command(name = "library-version-analysis")]
#[command(version)]
#[command(
    about = "Report version drift, vulnerabilities and ownership for a repository's libraries",
    long_about = None
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Configuration file (defaults to library_version_analysis.yml in the project directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Package ecosystem: npm, bundler or pip (alerts only)
    #[arg(short, long)]
    pub ecosystem: Option<Ecosystem>,

    /// Repository name used in the report and for alert lookup
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// `npm list --all` output (JSON or text) or Gemfile.lock, used to propagate owners
    #[arg(long, value_name = "FILE")]
    pub dependency_tree: Option<PathBuf>,

    /// Drift report: `npx libyear --json` or `libyear-bundler --versions` output
    #[arg(long, value_name = "FILE")]
    pub drift_report: Option<PathBuf>,

    /// `libyear-bundler --libyear` output (bundler only)
    #[arg(long, value_name = "FILE")]
    pub libyear_report: Option<PathBuf>,

    /// File carrying ownership declarations (package.json or Gemfile)
    #[arg(long, value_name = "FILE")]
    pub ownership_file: Option<PathBuf>,

    /// GitHub owner of the repository; enables vulnerability alerts (needs GITHUB_READ_API_TOKEN)
    #[arg(long, value_name = "OWNER")]
    pub github_owner: Option<String>,

    /// Also report alerts fixed on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub fixed_since: Option<String>,

    /// Reject drift reports older than this many minutes
    #[arg(long, value_name = "MINUTES")]
    pub max_report_age: Option<u64>,

    /// POST the JSON report to this URL (needs UPLOAD_KEY)
    #[arg(long, value_name = "URL")]
    pub upload_url: Option<String>,

    /// Post alerts raised within the notification window to this chat webhook
    /// (falls back to ALERT_WEBHOOK_URL)
    #[arg(long, value_name = "URL")]
    pub notify_webhook: Option<String>,

    /// Hours looked back for newly raised alerts [default: 25]
    #[arg(long, value_name = "HOURS")]
    pub notify_window_hours: Option<u64>,

    /// Exit with code 1 when unowned libraries need attention
    #[arg(long)]
    pub fail_on_unowned: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
