//! Certificate URL extraction and allow-list filtering

use crate::config::{CertificateConfig, PathRule};
use log::debug;
use regex::Regex;
use reqwest::Url;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

fn candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s,]+").expect("Invalid URL regex"))
}

/// Keeps only URLs on known learning and credential hosts
pub struct CertificateUrlFilter {
    allowed_domains: HashSet<String>,
    path_rules: HashMap<String, PathRule>,
}

impl CertificateUrlFilter {
    pub fn new(allowed_domains: &[String], path_rules: &[(String, PathRule)]) -> Self {
        Self {
            allowed_domains: allowed_domains.iter().map(|d| d.to_lowercase()).collect(),
            path_rules: path_rules
                .iter()
                .map(|(domain, rule)| (domain.to_lowercase(), *rule))
                .collect(),
        }
    }

    pub fn from_config(config: &CertificateConfig) -> Self {
        let rules: Vec<(String, PathRule)> = config
            .path_rules
            .iter()
            .map(|r| (r.domain.clone(), r.rule))
            .collect();
        Self::new(&config.allowed_domains, &rules)
    }

    /// Allow-listed certificate URLs in the order they appear in `text`
    pub fn extract_candidate_urls(&self, text: &str) -> Vec<String> {
        candidate_regex()
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|url| self.is_allowed(url))
            .map(str::to_string)
            .collect()
    }

    pub fn is_allowed(&self, raw: &str) -> bool {
        if let Err(e) = Url::parse(raw) {
            debug!("Dropping unparseable URL {}: {}", raw, e);
            return false;
        }
        let (authority, path) = match split_authority(raw) {
            Some(parts) => parts,
            None => return false,
        };

        // Ports and credentials never match an allow-listed host
        if authority.contains(':') || authority.contains('@') {
            return false;
        }

        let host = authority.to_lowercase();
        let domain = host.strip_prefix("www.").unwrap_or(&host);

        if !self.allowed_domains.contains(domain) {
            return false;
        }

        match self.path_rules.get(domain) {
            Some(rule) => Self::path_matches(*rule, path),
            None => true,
        }
    }

    fn path_matches(rule: PathRule, path: &str) -> bool {
        match rule {
            PathRule::LearningSection => {
                path.starts_with("/learning") || path.contains("/learning/")
            }
            PathRule::AcademySegment => path.to_lowercase().contains("academy"),
        }
    }
}

/// Authority and path exactly as written, without query or fragment
fn split_authority(raw: &str) -> Option<(&str, &str)> {
    let (_, rest) = raw.split_once("://")?;
    let authority_end = rest.find(|c| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let path_end = tail.find(|c| matches!(c, '?' | '#')).unwrap_or(tail.len());
    Some((authority, &tail[..path_end]))
}
