//! CLI interface for the CV extractor

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cv-extractor")]
#[command(about = "CV information extraction pipeline")]
#[command(
    long_about = "Extract professional experience, leadership roles, education and a profile summary from a CV, using an LLM or rule-based patterns"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract structured fields from a CV
    Extract {
        /// Path to the CV file (PDF or TXT)
        cv: PathBuf,

        /// Extraction strategy: llm, pattern
        #[arg(short, long)]
        strategy: Option<String>,

        /// Output format: json, console
        #[arg(short, long, default_value = "json")]
        output: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate the extraction strategy
pub fn parse_strategy(strategy: &str) -> Result<crate::config::Strategy, String> {
    match strategy.to_lowercase().as_str() {
        "llm" => Ok(crate::config::Strategy::Llm),
        "pattern" => Ok(crate::config::Strategy::Pattern),
        _ => Err(format!(
            "Invalid strategy: {}. Supported: llm, pattern",
            strategy
        )),
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::output::formatter::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "json" => Ok(crate::output::formatter::OutputFormat::Json),
        "console" => Ok(crate::output::formatter::OutputFormat::Console),
        _ => Err(format!(
            "Invalid output format: {}. Supported: json, console",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;

    #[test]
    fn test_parse_strategy() {
        assert_eq!(parse_strategy("llm").unwrap(), Strategy::Llm);
        assert_eq!(parse_strategy("Pattern").unwrap(), Strategy::Pattern);
        assert!(parse_strategy("magic").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let pdf = PathBuf::from("cv.pdf");
        assert!(validate_file_extension(&pdf, &["pdf", "txt"]).is_ok());

        let docx = PathBuf::from("cv.docx");
        assert!(validate_file_extension(&docx, &["pdf", "txt"]).is_err());
    }
}
