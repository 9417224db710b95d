use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Selects the infrastructure adapter for an application-level format.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for the requested output format
    ///
    /// # Examples
    /// ```
    /// use library_version_analysis::application::dto::OutputFormat;
    /// use library_version_analysis::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Formatter for the upload payload, always compact JSON
    pub fn create_upload() -> Box<dyn ReportFormatter> {
        Box::new(JsonFormatter::compact())
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON report...",
            OutputFormat::Markdown => "📝 Generating Markdown report...",
        }
    }
}
