//! Configuration management for the resume checker

use crate::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub similarity: SimilarityConfig,
    pub certificates: CertificateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub path: PathBuf,
    pub text_column: String,
    pub category_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Scores at or above this value mark a resume as plagiarized
    pub plagiarism_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateConfig {
    pub fetch_timeout_secs: u64,
    /// Characters of stripped page content kept for verification
    pub content_limit: usize,
    pub user_agent: String,
    pub allowed_domains: Vec<String>,
    pub path_rules: Vec<DomainPathRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainPathRule {
    pub domain: String,
    pub rule: PathRule,
}

/// Extra path constraint for hosts that serve more than certificates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathRule {
    /// Path starts with `/learning` or contains a `/learning/` segment
    LearningSection,
    /// Path mentions `academy`, case-insensitive
    AcademySegment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let allowed_domains = [
            "coursera.org",
            "udemy.com",
            "edx.org",
            "linkedin.com",
            "freecodecamp.org",
            "datacamp.com",
            "hackerrank.com",
            "leetcode.com",
            "aws.amazon.com",
            "microsoft.com",
            "cloud.google.com",
            "hubspot.com",
            "comptia.org",
            "isc2.org",
        ];

        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("Resume.csv"),
                text_column: "Resume_str".to_string(),
                category_column: "Category".to_string(),
            },
            similarity: SimilarityConfig {
                plagiarism_threshold: 0.75,
            },
            certificates: CertificateConfig {
                fetch_timeout_secs: 5,
                content_limit: 1000,
                user_agent: format!("resume-checker/{}", env!("CARGO_PKG_VERSION")),
                allowed_domains: allowed_domains.iter().map(|d| d.to_string()).collect(),
                path_rules: vec![
                    DomainPathRule {
                        domain: "linkedin.com".to_string(),
                        rule: PathRule::LearningSection,
                    },
                    DomainPathRule {
                        domain: "hubspot.com".to_string(),
                        rule: PathRule::AcademySegment,
                    },
                ],
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults on first use
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                CheckerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CheckerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-checker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.similarity.plagiarism_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CheckerError::Configuration(format!(
                "plagiarism_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.certificates.fetch_timeout_secs == 0 {
            return Err(CheckerError::Configuration(
                "fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.certificates.content_limit == 0 {
            return Err(CheckerError::Configuration(
                "content_limit must be greater than zero".to_string(),
            ));
        }
        if self.corpus.text_column.trim().is_empty()
            || self.corpus.category_column.trim().is_empty()
        {
            return Err(CheckerError::Configuration(
                "corpus column names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
