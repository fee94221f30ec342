//! CLI interface for the resume checker

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-checker")]
#[command(about = "Resume plagiarism and certificate verification tool")]
#[command(
    long_about = "Compare a resume against a reference corpus with TF-IDF similarity \
                  and verify linked course certificates"
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
    /// Run the full plagiarism and certificate check
    Check {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Reference corpus CSV (overrides config)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show per-certificate details
        #[arg(short, long)]
        detailed: bool,
    },

    /// Report the nearest corpus match for a resume
    Similarity {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Reference corpus CSV (overrides config)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// List the allow-listed certificate URLs found in a resume
    Urls {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Show reference corpus statistics
    Corpus {
        /// Reference corpus CSV (overrides config)
        #[arg(long)]
        corpus: Option<PathBuf>,
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

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_check_arguments() {
        let cli = Cli::try_parse_from([
            "resume-checker",
            "check",
            "--resume",
            "cv.pdf",
            "--corpus",
            "Resume.csv",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Check { resume, corpus, output, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(corpus, Some(PathBuf::from("Resume.csv")));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected check command"),
        }
    }
}
