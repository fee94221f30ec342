//! Integration tests for the resume checker

use resume_checker::config::Config;
use resume_checker::error::{CheckerError, Result};
use resume_checker::input::InputManager;
use resume_checker::processing::corpus::ReferenceCorpus;
use resume_checker::processing::decision::{CertificateVerdict, ResumeVerdict};
use resume_checker::processing::verifier::{
    CertificatePage, CertificateSource, CertificateVerifier, HttpCertificateSource,
};
use resume_checker::{PlagiarismChecker, SimilarityIndex};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const CORPUS_CSV: &str = "ID,Resume_str,Category\n\
1,\"Certified public accountant with payroll, audit and tax experience\",FINANCE\n\
2,\"Head chef running a seasonal menu in a fine dining kitchen\",CHEF\n\
3,,HR\n\
4,\"Registered nurse caring for patients in intensive care\",HEALTHCARE\n";

fn write_corpus(dir: &Path) -> PathBuf {
    let path = dir.join("Resume.csv");
    std::fs::write(&path, CORPUS_CSV).unwrap();
    path
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn build_index(dir: &Path) -> SimilarityIndex {
    let corpus = ReferenceCorpus::load(&write_corpus(dir), "Resume_str", "Category").unwrap();
    assert_eq!(corpus.len(), 3);
    SimilarityIndex::build(&corpus).unwrap()
}

/// Serves canned pages by URL; unknown URLs fail like a refused connection
struct CannedSource {
    pages: HashMap<String, (u16, String)>,
}

impl CannedSource {
    fn new(pages: &[(&str, u16, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, status, body)| (url.to_string(), (*status, body.to_string())))
                .collect(),
        }
    }
}

impl CertificateSource for CannedSource {
    async fn fetch(&self, url: &str) -> Result<CertificatePage> {
        self.pages
            .get(url)
            .map(|(status, body)| CertificatePage {
                status: *status,
                body: body.clone(),
            })
            .ok_or_else(|| CheckerError::Network(format!("no route to {}", url)))
    }
}

#[tokio::test]
async fn test_docx_extraction_joins_paragraphs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.DOCX");
    write_docx(&path, &["Jane Smith", "Backend engineer"]);

    let text = InputManager::new().extract_text(&path).await.unwrap();
    assert_eq!(text, "Jane Smith Backend engineer");
}

#[tokio::test]
async fn test_unique_resume_without_certificates_is_eligible() {
    let dir = TempDir::new().unwrap();
    let index = build_index(dir.path());
    let resume = dir.path().join("resume.docx");
    write_docx(&resume, &["Embedded firmware developer", "Rust drivers for industrial sensors"]);

    let checker = PlagiarismChecker::new(&index, CannedSource::new(&[]), &Config::default());
    let report = checker.check(&resume).await.unwrap();

    assert_eq!(report.resume.verdict, ResumeVerdict::Unique);
    assert!(report.certificates.is_empty());
    assert!(report.eligible);
}

#[tokio::test]
async fn test_copied_resume_is_rejected() {
    let dir = TempDir::new().unwrap();
    let index = build_index(dir.path());
    let resume = dir.path().join("copied.docx");
    write_docx(
        &resume,
        &["Certified public accountant with payroll, audit and tax experience"],
    );

    let checker = PlagiarismChecker::new(&index, CannedSource::new(&[]), &Config::default());
    let report = checker.check(&resume).await.unwrap();

    assert_eq!(report.resume.verdict, ResumeVerdict::Plagiarized);
    assert_eq!(report.resume.nearest_category.as_deref(), Some("FINANCE"));
    assert!(!report.eligible);
}

#[tokio::test]
async fn test_unverified_certificate_rejects_unique_resume() {
    let dir = TempDir::new().unwrap();
    let index = build_index(dir.path());
    let resume = dir.path().join("resume.docx");
    write_docx(
        &resume,
        &[
            "Embedded firmware developer",
            "Certificates: https://www.coursera.org/verify/GOOD, \
             https://udemy.com/certificate/GONE",
            "Portfolio https://example.com/me",
        ],
    );

    let source = CannedSource::new(&[
        ("https://www.coursera.org/verify/GOOD", 200, "<h1>Certificate of completion</h1>"),
        ("https://udemy.com/certificate/GONE", 404, "Not Found"),
    ]);
    let checker = PlagiarismChecker::new(&index, source, &Config::default());
    let report = checker.check(&resume).await.unwrap();

    let verdicts: Vec<CertificateVerdict> = report.certificates.iter().map(|c| c.verdict).collect();
    assert_eq!(verdicts, vec![CertificateVerdict::Verified, CertificateVerdict::Unverified]);
    assert!(!report.eligible);
}

#[tokio::test]
async fn test_unreadable_docx_is_rejected_not_error() {
    let dir = TempDir::new().unwrap();
    let index = build_index(dir.path());
    let resume = dir.path().join("broken.docx");
    std::fs::write(&resume, b"definitely not a zip archive").unwrap();

    let checker = PlagiarismChecker::new(&index, CannedSource::new(&[]), &Config::default());
    let report = checker.check(&resume).await.unwrap();

    assert_eq!(report.resume.verdict, ResumeVerdict::Indeterminate);
    assert!(!report.eligible);
}

#[tokio::test]
async fn test_unsupported_format_raises() {
    let dir = TempDir::new().unwrap();
    let index = build_index(dir.path());
    let resume = dir.path().join("resume.txt");
    std::fs::write(&resume, "Embedded firmware developer").unwrap();

    let checker = PlagiarismChecker::new(&index, CannedSource::new(&[]), &Config::default());
    assert!(matches!(
        checker.check(&resume).await,
        Err(CheckerError::UnsupportedFormat(_))
    ));
}

/// Answer one HTTP request with a fixed status line and body
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}/verify/cert", addr)
}

#[tokio::test]
async fn test_http_source_classification() {
    let dir = TempDir::new().unwrap();
    let index = build_index(dir.path());
    let config = Config::default();
    let source = HttpCertificateSource::new(&config.certificates).unwrap();
    let verifier = CertificateVerifier::new(&source, &index, config.certificates.content_limit);

    let not_found = serve_once("404 Not Found", "<h1>missing</h1>").await;
    let check = verifier.fetch_and_verify(&not_found).await;
    assert_eq!(check.verdict, CertificateVerdict::Unverified);
    assert_eq!(check.status, Some(404));

    let empty = serve_once("200 OK", "").await;
    assert_eq!(verifier.fetch_and_verify(&empty).await.verdict, CertificateVerdict::Indeterminate);

    let ok =
        serve_once("200 OK", "<html><body>Certificate awarded to Jane Smith</body></html>").await;
    assert_eq!(verifier.fetch_and_verify(&ok).await.verdict, CertificateVerdict::Verified);

    let server_error = serve_once("500 Internal Server Error", "oops").await;
    assert_eq!(
        verifier.fetch_and_verify(&server_error).await.verdict,
        CertificateVerdict::Indeterminate
    );
}

#[tokio::test]
async fn test_http_source_connection_failure_is_indeterminate() {
    let dir = TempDir::new().unwrap();
    let index = build_index(dir.path());
    let config = Config::default();
    let source = HttpCertificateSource::new(&config.certificates).unwrap();
    let verifier = CertificateVerifier::new(&source, &index, config.certificates.content_limit);

    // Bind then drop to get a port with nothing listening
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let check = verifier.fetch_and_verify(&format!("http://{}/cert", addr)).await;

    assert_eq!(check.verdict, CertificateVerdict::Indeterminate);
    assert_eq!(check.status, None);
}
