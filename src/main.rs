//! Resume checker: plagiarism and certificate verification tool

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_checker::cli::{self, Cli, Commands, ConfigAction};
use resume_checker::config::Config;
use resume_checker::error::{CheckerError, Result};
use resume_checker::input::InputManager;
use resume_checker::output::formatter::{render, save_report};
use resume_checker::processing::certificates::CertificateUrlFilter;
use resume_checker::processing::corpus::ReferenceCorpus;
use resume_checker::processing::verifier::HttpCertificateSource;
use resume_checker::{PlagiarismChecker, SimilarityIndex};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

/// Load the corpus and fit the index once for the whole run
fn build_index(
    config: &Config,
    corpus_override: Option<PathBuf>,
) -> Result<(ReferenceCorpus, SimilarityIndex)> {
    let mut corpus_config = config.corpus.clone();
    if let Some(path) = corpus_override {
        corpus_config.path = path;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Indexing corpus {}", corpus_config.path.display()));

    let built = ReferenceCorpus::load_with(&corpus_config)
        .and_then(|corpus| SimilarityIndex::build(&corpus).map(|index| (corpus, index)));

    spinner.finish_and_clear();
    built
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Check {
            resume,
            corpus,
            output,
            save,
            detailed,
        } => {
            let format = match output {
                Some(value) => {
                    cli::parse_output_format(&value).map_err(CheckerError::InvalidInput)?
                }
                None => config.output.format,
            };

            let (_, index) = build_index(&config, corpus)?;
            let source = HttpCertificateSource::new(&config.certificates)?;
            let checker = PlagiarismChecker::new(&index, source, &config);

            info!("Checking resume {}", resume.display());
            let report = checker.check(&resume).await?;

            let use_colors = config.output.color_output && save.is_none();
            let rendered = render(&report, format, use_colors, detailed || config.output.detailed)?;

            match save {
                Some(path) => {
                    save_report(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                    println!("Eligible: {}", report.eligible);
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Similarity { resume, corpus } => {
            let (_, index) = build_index(&config, corpus)?;
            let text = InputManager::new().extract_text(&resume).await?;
            let result = index.query(&text)?;

            println!("Max similarity: {:.4}", result.max_score);
            println!("Closest category: {}", result.nearest_category);
            println!("Corpus row: {}", result.nearest_index);
            println!(
                "Plagiarism threshold: {:.2} ({})",
                config.similarity.plagiarism_threshold,
                if result.max_score >= config.similarity.plagiarism_threshold {
                    "exceeded"
                } else {
                    "not reached"
                }
            );
        }

        Commands::Urls { resume } => {
            let text = InputManager::new().extract_text(&resume).await?;
            let filter = CertificateUrlFilter::from_config(&config.certificates);
            let urls = filter.extract_candidate_urls(&text);

            if urls.is_empty() {
                println!("No certificate URLs found");
            }
            for url in urls {
                println!("{}", url);
            }
        }

        Commands::Corpus { corpus } => {
            let (corpus, index) = build_index(&config, corpus)?;

            println!("Documents: {}", corpus.len());
            println!("Vocabulary: {} terms", index.vocabulary_size());
            println!("Categories:");
            for (category, count) in corpus.category_counts() {
                println!("  • {}: {}", category, count);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    CheckerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}
