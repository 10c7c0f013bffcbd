//! TF-IDF term-document index with cosine-similarity lookup
//!
//! Built once over the example corpus at startup and read-only afterwards.
//! Vocabulary order, tokenization and idf weighting are fixed at build time,
//! so identical corpora produce identical indexes and identical rankings.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::tokenizer::tokenize;
use crate::domain::{DomainError, Example, RetrievedExample};

/// Immutable TF-IDF index over the example corpus.
#[derive(Debug, Clone)]
pub struct TfidfIndex {
    examples: Vec<Example>,
    /// term -> column, terms in sorted order
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column
    idf: Vec<f32>,
    /// One L2-normalized row per example
    rows: Vec<Vec<f32>>,
}

impl TfidfIndex {
    /// Fit the index over the corpus. Fails when the corpus is empty.
    pub fn build(examples: Vec<Example>) -> Result<Self, DomainError> {
        if examples.is_empty() {
            return Err(DomainError::empty_corpus(
                "cannot build a retrieval index over zero examples",
            ));
        }

        let documents: Vec<Vec<String>> = examples
            .iter()
            .map(|example| tokenize(&example.indexed_text()))
            .collect();

        // Sorted vocabulary keeps column assignment deterministic.
        let terms: BTreeSet<&str> = documents
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for tokens in &documents {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                if let Some(&column) = vocabulary.get(term) {
                    document_frequency[column] += 1;
                }
            }
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let corpus_size = examples.len() as f32;
        let idf: Vec<f32> = document_frequency
            .iter()
            .map(|&df| ((1.0 + corpus_size) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let rows: Vec<Vec<f32>> = documents
            .iter()
            .map(|tokens| weighted_vector(tokens, &vocabulary, &idf))
            .collect();

        debug!(
            examples = examples.len(),
            vocabulary = vocabulary.len(),
            "Built TF-IDF index"
        );

        Ok(Self {
            examples,
            vocabulary,
            idf,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// The `k` examples most similar to `query` by cosine similarity,
    /// descending. `k` larger than the corpus returns every example.
    ///
    /// Ties (including a query with no shared vocabulary, which scores 0.0
    /// against every example) break by original corpus order.
    pub fn top_k(&self, query: &str, k: usize) -> Vec<RetrievedExample> {
        let query_vector = weighted_vector(&tokenize(query), &self.vocabulary, &self.idf);

        let mut scored: Vec<(usize, f32)> = self
            .rows
            .iter()
            .map(|row| dot(&query_vector, row))
            .enumerate()
            .collect();

        scored.sort_by(|(left_index, left_score), (right_index, right_score)| {
            right_score
                .partial_cmp(left_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(left_index.cmp(right_index))
        });

        scored
            .into_iter()
            .take(k.min(self.examples.len()))
            .map(|(index, score)| RetrievedExample::new(self.examples[index].clone(), score))
            .collect()
    }
}

/// Term-count vector weighted by idf and L2-normalized. Unknown terms
/// contribute nothing; an all-unknown input yields the zero vector.
fn weighted_vector(tokens: &[String], vocabulary: &HashMap<String, usize>, idf: &[f32]) -> Vec<f32> {
    let mut vector = vec![0.0f32; vocabulary.len()];

    for token in tokens {
        if let Some(&column) = vocabulary.get(token.as_str()) {
            vector[column] += idf[column];
        }
    }

    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }

    vector
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
