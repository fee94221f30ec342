//! Per-resume plagiarism and certificate check

use crate::config::Config;
use crate::error::{CheckerError, Result};
use crate::input::InputManager;
use crate::output::report::{CheckReport, ResumeCheck};
use crate::processing::certificates::CertificateUrlFilter;
use crate::processing::decision::{decide, CertificateVerdict, ResumeVerdict};
use crate::processing::similarity::SimilarityIndex;
use crate::processing::verifier::{CertificateCheck, CertificateSource, CertificateVerifier};
use log::{error, info, warn};
use std::path::Path;
use std::time::Instant;

/// Runs the checks for one resume against a shared, prebuilt index
pub struct PlagiarismChecker<'a, S: CertificateSource> {
    index: &'a SimilarityIndex,
    source: S,
    filter: CertificateUrlFilter,
    input: InputManager,
    threshold: f64,
    content_limit: usize,
}

impl<'a, S: CertificateSource> PlagiarismChecker<'a, S> {
    pub fn new(index: &'a SimilarityIndex, source: S, config: &Config) -> Self {
        Self {
            index,
            source,
            filter: CertificateUrlFilter::from_config(&config.certificates),
            input: InputManager::new(),
            threshold: config.similarity.plagiarism_threshold,
            content_limit: config.certificates.content_limit,
        }
    }

    /// Eligibility only; every doubtful case is `false`
    pub async fn is_eligible(&self, path: &Path) -> Result<bool> {
        Ok(self.check(path).await?.eligible)
    }

    /// Full report; errors only for an unsupported file type
    pub async fn check(&self, path: &Path) -> Result<CheckReport> {
        let started = Instant::now();

        if !path.exists() {
            warn!("Resume file does not exist: {}", path.display());
            let resume = ResumeCheck::indeterminate("resume file not found");
            return Ok(CheckReport::new(path, resume, Vec::new(), started.elapsed()));
        }

        let text = match self.input.try_extract_text(path).await {
            Ok(text) => text,
            Err(e @ CheckerError::UnsupportedFormat(_)) => return Err(e),
            Err(e) => {
                error!("Resume text extraction failed for {}: {}", path.display(), e);
                let resume = ResumeCheck::indeterminate(&e.to_string());
                return Ok(CheckReport::new(path, resume, Vec::new(), started.elapsed()));
            }
        };

        let urls = self.filter.extract_candidate_urls(&text);
        info!("Found {} certificate URL(s) in {}", urls.len(), path.display());

        let resume = self.check_resume(&text);
        let certificates = self.check_certificates(&urls).await;

        let report = CheckReport::new(path, resume, certificates, started.elapsed());
        info!(
            "Resume {} is {} ({} certificate(s))",
            path.display(),
            if report.eligible { "eligible" } else { "rejected" },
            report.certificates.len()
        );
        Ok(report)
    }

    pub fn check_resume(&self, text: &str) -> ResumeCheck {
        match self.index.query(text) {
            Ok(result) => {
                let verdict = ResumeVerdict::from_score(result.max_score, self.threshold);
                ResumeCheck {
                    verdict,
                    max_score: Some(result.max_score),
                    nearest_category: Some(result.nearest_category),
                    reason: None,
                }
            }
            Err(e) => {
                warn!("Resume similarity query failed: {}", e);
                ResumeCheck::indeterminate(&e.to_string())
            }
        }
    }

    pub async fn check_certificates(&self, urls: &[String]) -> Vec<CertificateCheck> {
        let verifier = CertificateVerifier::new(&self.source, self.index, self.content_limit);
        let mut checks = Vec::with_capacity(urls.len());
        for url in urls {
            checks.push(verifier.fetch_and_verify(url).await);
        }
        checks
    }

    pub fn certificate_urls(&self, text: &str) -> Vec<String> {
        self.filter.extract_candidate_urls(text)
    }
}

/// Combine a resume check and certificate checks into the final boolean
pub fn combine(resume: &ResumeCheck, certificates: &[CertificateCheck]) -> bool {
    let verdicts: Vec<CertificateVerdict> = certificates.iter().map(|c| c.verdict).collect();
    decide(resume.verdict, &verdicts)
}
