//! Output formatters for check reports

use crate::config::OutputFormat;
use crate::error::{CheckerError, Result};
use crate::output::report::CheckReport;
use crate::processing::decision::{CertificateVerdict, ResumeVerdict};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting check reports
pub trait OutputFormatter {
    fn format_report(&self, report: &CheckReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for downstream consumers
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn resume_color(verdict: ResumeVerdict) -> Color {
        match verdict {
            ResumeVerdict::Unique => Color::Green,
            ResumeVerdict::Plagiarized => Color::Red,
            ResumeVerdict::Indeterminate => Color::Yellow,
        }
    }

    fn certificate_color(verdict: CertificateVerdict) -> Color {
        match verdict {
            CertificateVerdict::Verified => Color::Green,
            CertificateVerdict::Unverified => Color::Red,
            CertificateVerdict::Indeterminate => Color::Yellow,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &CheckReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("\nResume: {}\n", report.resume_path));
        let verdict = report.resume.verdict;
        output.push_str(&format!(
            "Resume check: {}",
            self.colorize(&verdict.to_string(), Self::resume_color(verdict))
        ));
        if let Some(score) = report.resume.max_score {
            output.push_str(&format!(" (max similarity {:.2}", score));
            if let Some(category) = &report.resume.nearest_category {
                output.push_str(&format!(", closest category {}", category));
            }
            output.push(')');
        }
        output.push('\n');
        if let Some(reason) = &report.resume.reason {
            output.push_str(&format!("  reason: {}\n", reason));
        }

        if report.certificates.is_empty() {
            output.push_str("Certificates: none found\n");
        } else {
            output.push_str(&format!("Certificates ({}):\n", report.certificates.len()));
            for check in &report.certificates {
                output.push_str(&format!(
                    "  • {} [{}]\n",
                    check.url,
                    self.colorize(
                        &check.verdict.to_string(),
                        Self::certificate_color(check.verdict)
                    )
                ));
                if self.detailed {
                    let status = check
                        .status
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    output.push_str(&format!("    status: {}, {}\n", status, check.reason));
                }
            }
        }

        let decision = if report.eligible {
            self.colorize("ELIGIBLE", Color::Green)
        } else {
            self.colorize("REJECTED", Color::Red)
        };
        output.push_str(&format!("\nDecision: {} ({})\n", decision, report.eligible));

        if self.detailed {
            output.push_str(&format!(
                "Generated: {} | Processing time: {}ms\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &CheckReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &CheckReport) -> Result<String> {
        let mut md = String::new();
        md.push_str("# Resume Verification Report\n\n");
        md.push_str(&format!("- **File:** `{}`\n", report.resume_path));
        md.push_str(&format!(
            "- **Generated:** {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!(
            "- **Decision:** {}\n\n",
            if report.eligible { "eligible" } else { "rejected" }
        ));

        md.push_str("## Resume originality\n\n");
        md.push_str(&format!("- Verdict: {}\n", report.resume.verdict));
        if let Some(score) = report.resume.max_score {
            md.push_str(&format!("- Max similarity: {:.2}\n", score));
        }
        if let Some(category) = &report.resume.nearest_category {
            md.push_str(&format!("- Closest category: {}\n", category));
        }
        if let Some(reason) = &report.resume.reason {
            md.push_str(&format!("- Reason: {}\n", reason));
        }

        md.push_str("\n## Certificates\n\n");
        if report.certificates.is_empty() {
            md.push_str("No certificate links found.\n");
        } else {
            md.push_str("| URL | Verdict | Status | Detail |\n|---|---|---|---|\n");
            for check in &report.certificates {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    check.url,
                    check.verdict,
                    check.status.map(|s| s.to_string()).unwrap_or_default(),
                    check.reason.replace('|', "\\|")
                ));
            }
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Format with the formatter matching `format`
pub fn render(
    report: &CheckReport,
    format: OutputFormat,
    use_colors: bool,
    detailed: bool,
) -> Result<String> {
    match format {
        OutputFormat::Console => ConsoleFormatter::new(use_colors, detailed).format_report(report),
        OutputFormat::Json => JsonFormatter::new(true).format_report(report),
        OutputFormat::Markdown => MarkdownFormatter.format_report(report),
    }
}

pub fn save_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content).map_err(|e| {
        CheckerError::OutputFormatting(format!(
            "Failed to write report to {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ResumeCheck;
    use crate::processing::verifier::CertificateCheck;
    use std::time::Duration;

    fn report() -> CheckReport {
        CheckReport::new(
            Path::new("jane.pdf"),
            ResumeCheck {
                verdict: ResumeVerdict::Unique,
                max_score: Some(0.31),
                nearest_category: Some("ENGINEERING".to_string()),
                reason: None,
            },
            vec![CertificateCheck {
                url: "https://coursera.org/verify/XYZ".to_string(),
                verdict: CertificateVerdict::Unverified,
                status: Some(404),
                reason: "page not found".to_string(),
            }],
            Duration::from_millis(12),
        )
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&report()).unwrap();
        assert!(output
            .contains("Resume check: Unique (max similarity 0.31, closest category ENGINEERING)"));
        assert!(output.contains("https://coursera.org/verify/XYZ [Unverified]"));
        assert!(output.contains("status: 404, page not found"));
        assert!(output.contains("Decision: REJECTED (false)"));
    }

    #[test]
    fn test_json_contains_decision() {
        let json = JsonFormatter::new(false).format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["eligible"], serde_json::Value::Bool(false));
        assert_eq!(value["resume"]["verdict"], "Unique");
        assert_eq!(value["certificates"][0]["verdict"], "Unverified");
    }

    #[test]
    fn test_markdown_table() {
        let md = MarkdownFormatter.format_report(&report()).unwrap();
        assert!(md.contains("- **Decision:** rejected"));
        assert!(
            md.contains("| https://coursera.org/verify/XYZ | Unverified | 404 | page not found |")
        );
    }
}
