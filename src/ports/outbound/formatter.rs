use crate::application::read_models::AnalysisReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering an analysis report
///
/// This port abstracts the output format (JSON payload, Markdown, ...).
pub trait ReportFormatter {
    /// Formats the report read model
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &AnalysisReadModel) -> Result<String>;
}
