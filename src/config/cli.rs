use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cv-etl")]
#[command(about = "Structure the first page of a résumé PDF into a CSV row")]
pub struct CliConfig {
    #[arg(long, default_value = "cv.pdf", help = "Résumé PDF to read")]
    pub input: String,

    #[arg(long, default_value = "cv_csv.csv", help = "CSV file to create or overwrite")]
    pub output: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, help = "Request timeout for the structuring call")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "TOML configuration file, replaces the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, "pdf")?;
        validation::validate_path("output", &self.output)?;
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 3600)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["cv-etl"]);

        assert_eq!(config.input_path(), "cv.pdf");
        assert_eq!(config.output_path(), "cv_csv.csv");
        assert_eq!(config.model(), "gemini-2.5-flash");
        assert_eq!(config.timeout_seconds(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = CliConfig::parse_from([
            "cv-etl",
            "--input",
            "docs/resume.pdf",
            "--output",
            "out/resume.csv",
            "--timeout-seconds",
            "30",
            "--verbose",
        ]);

        assert_eq!(config.input_path(), "docs/resume.pdf");
        assert_eq!(config.output_path(), "out/resume.csv");
        assert_eq!(config.timeout_seconds(), Some(30));
        assert!(config.verbose);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = CliConfig::parse_from(["cv-etl", "--input", "resume.docx"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["cv-etl", "--api-endpoint", "not a url"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["cv-etl", "--timeout-seconds", "0"]);
        assert!(config.validate().is_err());
    }
}
