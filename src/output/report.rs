//! Check report structures

use crate::processing::checker::combine;
use crate::processing::decision::ResumeVerdict;
use crate::processing::verifier::CertificateCheck;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeCheck {
    pub verdict: ResumeVerdict,
    pub max_score: Option<f64>,
    pub nearest_category: Option<String>,
    pub reason: Option<String>,
}

impl ResumeCheck {
    pub fn indeterminate(reason: &str) -> Self {
        Self {
            verdict: ResumeVerdict::Indeterminate,
            max_score: None,
            nearest_category: None,
            reason: Some(reason.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub resume_path: String,
    pub resume: ResumeCheck,
    pub certificates: Vec<CertificateCheck>,
    /// `false` for plagiarized, indeterminate, or failed-certificate resumes
    pub eligible: bool,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl CheckReport {
    pub fn new(
        path: &Path,
        resume: ResumeCheck,
        certificates: Vec<CertificateCheck>,
        elapsed: Duration,
    ) -> Self {
        let eligible = combine(&resume, &certificates);
        Self {
            resume_path: path.display().to_string(),
            resume,
            certificates,
            eligible,
            generated_at: Utc::now(),
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::decision::CertificateVerdict;

    fn certificate(verdict: CertificateVerdict) -> CertificateCheck {
        CertificateCheck {
            url: "https://coursera.org/verify/1".to_string(),
            verdict,
            status: Some(200),
            reason: String::new(),
        }
    }

    #[test]
    fn test_report_derives_eligibility() {
        let unique = ResumeCheck {
            verdict: ResumeVerdict::Unique,
            max_score: Some(0.2),
            nearest_category: Some("HR".to_string()),
            reason: None,
        };

        let accepted = CheckReport::new(Path::new("a.pdf"), unique.clone(), vec![], Duration::ZERO);
        assert!(accepted.eligible);

        let rejected = CheckReport::new(
            Path::new("a.pdf"),
            unique,
            vec![certificate(CertificateVerdict::Unverified)],
            Duration::ZERO,
        );
        assert!(!rejected.eligible);
    }

    #[test]
    fn test_indeterminate_report_is_rejected() {
        let report = CheckReport::new(
            Path::new("a.docx"),
            ResumeCheck::indeterminate("unreadable"),
            vec![],
            Duration::ZERO,
        );
        assert!(!report.eligible);
    }
}
