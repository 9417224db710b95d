use serde::Deserialize;

/// Output format enumeration for analysis reports
///
/// Shared by the CLI, the configuration file and the formatters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Upload payload JSON (default)
    #[default]
    Json,
    /// Human-readable Markdown format
    #[serde(alias = "md")]
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'markdown'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        for (input, expected) in [
            ("json", OutputFormat::Json),
            ("JSON", OutputFormat::Json),
            ("markdown", OutputFormat::Markdown),
            ("MD", OutputFormat::Markdown),
        ] {
            assert_eq!(OutputFormat::from_str(input).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let error = OutputFormat::from_str("csv").unwrap_err();
        assert!(error.contains("Invalid format: csv"));
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_output_format_display_and_default() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_deserialize() {
        let format: OutputFormat = serde_yaml_ng::from_str("md").unwrap();
        assert_eq!(format, OutputFormat::Markdown);
        let format: OutputFormat = serde_yaml_ng::from_str("json").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
