//! Verification outcomes and the final eligibility decision

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeVerdict {
    Plagiarized,
    Unique,
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateVerdict {
    Verified,
    Unverified,
    Indeterminate,
}

impl ResumeVerdict {
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            ResumeVerdict::Plagiarized
        } else {
            ResumeVerdict::Unique
        }
    }
}

impl fmt::Display for ResumeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeVerdict::Plagiarized => write!(f, "Plagiarized"),
            ResumeVerdict::Unique => write!(f, "Unique"),
            ResumeVerdict::Indeterminate => write!(f, "Indeterminate"),
        }
    }
}

impl fmt::Display for CertificateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateVerdict::Verified => write!(f, "Verified"),
            CertificateVerdict::Unverified => write!(f, "Unverified"),
            CertificateVerdict::Indeterminate => write!(f, "Indeterminate"),
        }
    }
}

/// Eligible only for a unique resume whose certificates all verified.
///
/// No certificates at all is eligible.
pub fn decide(resume: ResumeVerdict, certificates: &[CertificateVerdict]) -> bool {
    match resume {
        ResumeVerdict::Plagiarized | ResumeVerdict::Indeterminate => false,
        ResumeVerdict::Unique => certificates.iter().all(|verdict| match verdict {
            CertificateVerdict::Verified => true,
            CertificateVerdict::Unverified | CertificateVerdict::Indeterminate => false,
        }),
    }
}
