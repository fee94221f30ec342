//! Resume checker library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{CheckerError, Result};
pub use config::Config;
pub use processing::checker::PlagiarismChecker;
pub use processing::similarity::SimilarityIndex;
