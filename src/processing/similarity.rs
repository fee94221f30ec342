//! TF-IDF vector space over the reference corpus with cosine-similarity lookup

use crate::error::{CheckerError, Result};
use crate::processing::corpus::ReferenceCorpus;
use crate::processing::text_processor::{normalize, TextProcessor};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sparse, L2-normalized document vector sorted by term id
type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Highest cosine similarity against the corpus, in [0, 1]
    pub max_score: f64,
    pub nearest_category: String,
    pub nearest_index: usize,
}

/// Fitted vector space; read-only after construction
pub struct SimilarityIndex {
    processor: TextProcessor,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
    categories: Vec<String>,
}

impl SimilarityIndex {
    pub fn build(corpus: &ReferenceCorpus) -> Result<Self> {
        let processor = TextProcessor::new();
        let tokenized: Vec<Vec<String>> = corpus
            .records()
            .iter()
            .map(|record| processor.tokenize(&normalize(&record.text)))
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokens {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(token.clone()).or_insert(next_id);
                if id == document_frequency.len() {
                    document_frequency.push(0);
                }
                seen.push(id);
            }
            seen.sort_unstable();
            seen.dedup();
            for id in seen {
                document_frequency[id] += 1;
            }
        }

        if vocabulary.is_empty() {
            return Err(CheckerError::CorpusLoad(
                "empty vocabulary; corpus documents contain only stop words".to_string(),
            ));
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n = tokenized.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            processor,
            vocabulary,
            idf,
            documents: Vec::with_capacity(tokenized.len()),
            categories: corpus.records().iter().map(|r| r.category.clone()).collect(),
        };
        index.documents = tokenized.iter().map(|tokens| index.vectorize(tokens)).collect();

        info!(
            "Built similarity index: {} documents, {} terms",
            index.documents.len(),
            index.vocabulary.len()
        );
        Ok(index)
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&id) = self.vocabulary.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(id, count)| (id, count * self.idf[id]))
            .collect();
        vector.sort_unstable_by_key(|&(id, _)| id);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in vector.iter_mut() {
                *weight /= norm;
            }
        }
        vector
    }

    fn dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Best-matching corpus row for `text`; the first row wins ties.
    ///
    /// Text with no known terms scores 0 against every row.
    pub fn query(&self, text: &str) -> Result<SimilarityResult> {
        if self.documents.is_empty() {
            return Err(CheckerError::Query("similarity index has no documents".to_string()));
        }

        let query = self.vectorize(&self.processor.tokenize(&normalize(text)));

        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, document) in self.documents.iter().enumerate() {
            let score = Self::dot(&query, document);
            if score > best_score {
                best_score = score;
                best_index = idx;
            }
        }

        if !best_score.is_finite() {
            return Err(CheckerError::Query(format!("non-finite similarity score {}", best_score)));
        }

        let result = SimilarityResult {
            max_score: best_score.clamp(0.0, 1.0),
            nearest_category: self.categories[best_index].clone(),
            nearest_index: best_index,
        };
        debug!(
            "Nearest corpus row {} ({}) at {:.3}",
            result.nearest_index, result.nearest_category, result.max_score
        );
        Ok(result)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
