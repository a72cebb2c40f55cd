//! Text similarity between a resume and a job description

use crate::error::{Result, ResumeMatchError};
use crate::processing::text_processor::TextProcessor;
use std::collections::{BTreeMap, BTreeSet};

/// Semantic closeness of two texts.
///
/// Implementations report failures as errors; the score composer treats any
/// error as a similarity of 0.0.
pub trait SimilarityEstimator: Send + Sync {
    fn estimate(&self, text_a: &str, text_b: &str) -> Result<f64>;

    fn name(&self) -> &'static str;
}

/// TF-IDF cosine similarity with a vectorizer fitted on just the two inputs.
///
/// Term weights are raw counts scaled by the smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1` over the two-document corpus, so
/// terms shared by both texts weigh less than terms unique to one of them.
pub struct TfIdfSimilarity {
    processor: TextProcessor,
}

impl Default for TfIdfSimilarity {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfSimilarity {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// Infallible wrapper: any degenerate input yields 0.0.
    pub fn similarity(&self, text_a: &str, text_b: &str) -> f64 {
        self.estimate(text_a, text_b).unwrap_or(0.0)
    }

    fn weighted_vectors(
        &self,
        text_a: &str,
        text_b: &str,
    ) -> Result<(BTreeMap<String, f64>, BTreeMap<String, f64>)> {
        let counts_a = self.processor.term_frequencies(text_a);
        let counts_b = self.processor.term_frequencies(text_b);

        let vocabulary: BTreeSet<&String> = counts_a.keys().chain(counts_b.keys()).collect();
        if vocabulary.is_empty() {
            return Err(ResumeMatchError::Similarity(
                "empty vocabulary; texts contain only stop words".to_string(),
            ));
        }
        if vocabulary.len() < 2 {
            return Err(ResumeMatchError::Similarity(
                "vocabulary has a single term".to_string(),
            ));
        }

        let documents = 2.0_f64;
        let idf = |term: &String| {
            let df = counts_a.contains_key(term) as u8 + counts_b.contains_key(term) as u8;
            ((1.0 + documents) / (1.0 + f64::from(df))).ln() + 1.0
        };

        let weigh = |counts: &BTreeMap<String, usize>| {
            counts
                .iter()
                .map(|(term, &count)| (term.clone(), count as f64 * idf(term)))
                .collect::<BTreeMap<_, _>>()
        };

        Ok((weigh(&counts_a), weigh(&counts_b)))
    }
}

impl SimilarityEstimator for TfIdfSimilarity {
    fn estimate(&self, text_a: &str, text_b: &str) -> Result<f64> {
        if text_a.trim().is_empty() || text_b.trim().is_empty() {
            return Err(ResumeMatchError::Similarity("empty text".to_string()));
        }

        let (vector_a, vector_b) = self.weighted_vectors(text_a, text_b)?;
        let score = cosine_similarity(&vector_a, &vector_b)?;
        Ok(score.clamp(0.0, 1.0))
    }

    fn name(&self) -> &'static str {
        "tf-idf cosine"
    }
}

/// Cosine of two sparse term vectors. Iteration runs in term order, which
/// keeps the floating-point sums identical across calls.
pub fn cosine_similarity(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> Result<f64> {
    let dot_product: f64 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();
    let norm_a: f64 = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(ResumeMatchError::Similarity("zero-length term vector".to_string()));
    }

    let score = dot_product / (norm_a * norm_b);
    if !score.is_finite() {
        return Err(ResumeMatchError::Similarity(format!("non-finite cosine {}", score)));
    }
    Ok(score)
}
