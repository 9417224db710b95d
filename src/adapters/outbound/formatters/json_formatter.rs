use crate::application::read_models::AnalysisReadModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter producing the report payload
///
/// The pretty form goes to stdout or a file; the compact form is what the
/// upload endpoint receives.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, model: &AnalysisReadModel) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(model)?
        } else {
            serde_json::to_string(model)?
        };
        Ok(json)
    }
}
