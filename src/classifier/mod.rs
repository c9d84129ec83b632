//! Classifier facade.
//!
//! [`Classifier`] wires the pieces together. Construction loads the label
//! universe and builds the shared cache and fetch pool; each prediction then
//! runs the same sequence:
//!
//! ```text
//! predict(text, text_field)
//!     ├─ TermCollection::collect     analyze + cache-or-fetch statistics
//!     ├─ score_label per known label
//!     ├─ rank (score desc, label asc)
//!     └─ normalize to percent-of-max (optional)
//! ```
//!
//! A classifier is `Send + Sync`; concurrent `predict` calls share only the
//! term cache and the immutable label registry.

mod config;
mod prediction;

use std::sync::Arc;

use rayon::ThreadPool;
use tracing::debug;

use crate::cache::TermCache;
use crate::collection::TermCollection;
use crate::corpus::CorpusBackend;
use crate::error::{DoxaError, Result};
use crate::labels::LabelPriors;
use crate::stats::StatsFetcher;

pub use config::ClassifierConfig;
pub use prediction::{LabelScore, Prediction};

/// Naive-Bayes-style multi-label classifier over an indexed corpus.
pub struct Classifier {
    config: ClassifierConfig,
    priors: Arc<LabelPriors>,
    fetcher: StatsFetcher,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("config", &self.config)
            .field("priors", &self.priors)
            .finish_non_exhaustive()
    }
}

impl Classifier {
    /// Create a classifier over `backend`.
    ///
    /// The label universe is loaded eagerly, so an empty corpus or an empty
    /// label field fails here rather than surprising the first prediction.
    pub fn new(backend: Arc<dyn CorpusBackend>, config: ClassifierConfig) -> Result<Self> {
        let priors = Arc::new(LabelPriors::load(
            backend.as_ref(),
            &config.label_field,
            config.expected_label_cardinality,
        )?);

        let cache = Arc::new(TermCache::new(config.cache_capacity));
        let num_threads = config.num_threads.unwrap_or_else(num_cpus::get);
        let pool: ThreadPool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| {
                DoxaError::invalid_operation(format!("failed to create fetch pool: {e}"))
            })?;

        let fetcher = StatsFetcher::new(backend, cache, Arc::clone(&priors), Arc::new(pool));

        Ok(Classifier {
            config,
            priors,
            fetcher,
        })
    }

    /// Predict a normalized label distribution for `text`.
    ///
    /// `text_field` selects the analysis pipeline and the filter field for
    /// per-term aggregations; it names whichever analyzed document field the
    /// input resembles (body, title, and so on).
    pub fn predict(&self, text: &str, text_field: &str) -> Result<Prediction> {
        self.predict_with(text, text_field, true)
    }

    /// Predict, optionally skipping percent-of-max normalization.
    ///
    /// Unnormalized scores are the raw logistic values in (0, 1); input text
    /// consisting entirely of terms unseen in training scores exactly 0.5
    /// for every label.
    pub fn predict_with(&self, text: &str, text_field: &str, normalize: bool) -> Result<Prediction> {
        let collection = TermCollection::collect(
            &self.fetcher,
            Arc::clone(&self.priors),
            self.config.scoring,
            &self.config.label_field,
            text_field,
            text,
        )?;

        let mut scores: Vec<LabelScore> = self
            .priors
            .labels()
            .map(|label| LabelScore {
                label: label.to_string(),
                score: collection.score_label(label),
            })
            .collect();

        if normalize {
            normalize_scores(&mut scores);
        }
        debug!(
            text_field,
            labels = scores.len(),
            normalized = normalize,
            "prediction complete"
        );

        Ok(Prediction::new(scores, normalize))
    }

    /// The label universe the classifier scores against.
    pub fn priors(&self) -> &LabelPriors {
        &self.priors
    }

    /// The configuration the classifier was built with.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Number of term aggregations currently cached.
    pub fn cached_terms(&self) -> usize {
        self.fetcher.cache().len()
    }
}

/// Rescale scores to percent-of-max.
///
/// An all-zero score vector cannot be scaled and degrades to a uniform
/// distribution instead. Already-normalized input is a fixed point: its
/// maximum is 100, so every score is rescaled by 1.
fn normalize_scores(scores: &mut [LabelScore]) {
    if scores.is_empty() {
        return;
    }

    let max = scores.iter().map(|s| s.score).fold(0.0_f64, f64::max);
    if max == 0.0 {
        let even = 100.0 / scores.len() as f64;
        for entry in scores.iter_mut() {
            entry.score = even;
        }
    } else {
        for entry in scores.iter_mut() {
            entry.score = entry.score / max * 100.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[(&str, f64)]) -> Vec<LabelScore> {
        values
            .iter()
            .map(|(label, score)| LabelScore {
                label: label.to_string(),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_normalize_rescales_to_percent_of_max() {
        let mut data = scores(&[("earn", 0.8), ("grain", 0.2)]);
        normalize_scores(&mut data);

        assert_eq!(data[0].score, 100.0);
        assert!((data[1].score - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = scores(&[("earn", 0.8), ("grain", 0.2), ("crude", 0.4)]);
        normalize_scores(&mut once);
        let mut twice = once.clone();
        normalize_scores(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_all_zero_falls_back_to_uniform() {
        let mut data = scores(&[("earn", 0.0), ("grain", 0.0), ("crude", 0.0), ("ship", 0.0)]);
        normalize_scores(&mut data);

        for entry in &data {
            assert_eq!(entry.score, 25.0);
        }
    }

    #[test]
    fn test_normalize_empty_is_a_no_op() {
        let mut data: Vec<LabelScore> = Vec::new();
        normalize_scores(&mut data);
        assert!(data.is_empty());
    }
}
