//! Certificate page retrieval and verification

use crate::config::CertificateConfig;
use crate::error::{CheckerError, Result};
use crate::processing::decision::CertificateVerdict;
use crate::processing::similarity::SimilarityIndex;
use log::{debug, info, warn};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid markup regex"))
}

/// Raw response for a certificate URL
#[derive(Debug, Clone)]
pub struct CertificatePage {
    pub status: u16,
    pub body: String,
}

pub trait CertificateSource {
    /// `Err` only for transport failures; HTTP error statuses come back as pages
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<CertificatePage>> + Send;
}

pub struct HttpCertificateSource {
    client: Client,
}

impl HttpCertificateSource {
    pub fn new(config: &CertificateConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| {
                CheckerError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl CertificateSource for HttpCertificateSource {
    async fn fetch(&self, url: &str) -> Result<CertificatePage> {
        debug!("Fetching certificate page: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(CertificatePage { status, body })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateCheck {
    pub url: String,
    pub verdict: CertificateVerdict,
    pub status: Option<u16>,
    pub reason: String,
}

/// Remove `<...>` tags, then keep the first `limit` characters
pub fn strip_markup(body: &str, limit: usize) -> String {
    markup_regex()
        .replace_all(body, "")
        .chars()
        .take(limit)
        .collect()
}

pub struct CertificateVerifier<'a, S: CertificateSource> {
    source: &'a S,
    index: &'a SimilarityIndex,
    content_limit: usize,
}

impl<'a, S: CertificateSource> CertificateVerifier<'a, S> {
    pub fn new(source: &'a S, index: &'a SimilarityIndex, content_limit: usize) -> Self {
        Self {
            source,
            index,
            content_limit,
        }
    }

    pub async fn fetch_and_verify(&self, url: &str) -> CertificateCheck {
        let fetched = self.source.fetch(url).await;
        let check = self.classify(url, fetched);
        info!("Certificate {} -> {}", url, check.verdict);
        check
    }

    fn classify(&self, url: &str, fetched: Result<CertificatePage>) -> CertificateCheck {
        let outcome = |verdict, status, reason: String| CertificateCheck {
            url: url.to_string(),
            verdict,
            status,
            reason,
        };

        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                warn!("Error fetching certificate URL '{}': {}", url, e);
                return outcome(CertificateVerdict::Indeterminate, None, e.to_string());
            }
        };

        if page.status == 404 {
            warn!("Certificate URL '{}' returned 404", url);
            return outcome(
                CertificateVerdict::Unverified,
                Some(page.status),
                "page not found".to_string(),
            );
        }
        if !(200..300).contains(&page.status) {
            warn!("Certificate URL '{}' returned HTTP {}", url, page.status);
            return outcome(
                CertificateVerdict::Indeterminate,
                Some(page.status),
                format!("HTTP status {}", page.status),
            );
        }

        let content = strip_markup(&page.body, self.content_limit);
        if content.trim().is_empty() {
            return outcome(
                CertificateVerdict::Indeterminate,
                Some(page.status),
                "empty page content".to_string(),
            );
        }

        // Certificates only need a successful query; the score is not compared
        match self.index.query(&content) {
            Ok(_) => outcome(
                CertificateVerdict::Verified,
                Some(page.status),
                "page content retrieved".to_string(),
            ),
            Err(e) => {
                warn!("Similarity query failed for '{}': {}", url, e);
                outcome(CertificateVerdict::Indeterminate, Some(page.status), e.to_string())
            }
        }
    }
}
