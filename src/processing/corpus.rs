//! Reference resume corpus loading

use crate::config::CorpusConfig;
use crate::error::{CheckerError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub text: String,
    pub category: String,
}

/// Labeled reference resumes, immutable once loaded
#[derive(Debug, Clone, Default)]
pub struct ReferenceCorpus {
    records: Vec<CorpusRecord>,
}

impl ReferenceCorpus {
    pub fn from_records(records: Vec<CorpusRecord>) -> Self {
        Self { records }
    }

    /// Load a CSV corpus, dropping rows with any missing field
    pub fn load(path: &Path, text_column: &str, category_column: &str) -> Result<Self> {
        if !path.exists() {
            return Err(CheckerError::CorpusLoad(format!(
                "Corpus file does not exist: {}",
                path.display()
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let column_index = |name: &str| {
            headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
                CheckerError::CorpusLoad(format!(
                    "Column '{}' not found in {}",
                    name,
                    path.display()
                ))
            })
        };
        let text_idx = column_index(text_column)?;
        let category_idx = column_index(category_column)?;

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in reader.records() {
            let row = row?;
            let complete = row.len() == headers.len() && row.iter().all(|field| !field.is_empty());
            if !complete {
                dropped += 1;
                continue;
            }
            records.push(CorpusRecord {
                text: row[text_idx].to_string(),
                category: row[category_idx].to_string(),
            });
        }

        if dropped > 0 {
            debug!("Dropped {} incomplete corpus rows", dropped);
        }
        info!("Loaded {} reference resumes from {}", records.len(), path.display());

        Ok(Self { records })
    }

    pub fn load_with(config: &CorpusConfig) -> Result<Self> {
        Self::load(&config.path, &config.text_column, &config.category_column)
    }

    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CorpusRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row count per category label
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
