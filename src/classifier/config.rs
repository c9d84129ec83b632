//! Classifier configuration.

use serde::{Deserialize, Serialize};

use crate::collection::ScoringConfig;

/// Configuration for a [`Classifier`](crate::classifier::Classifier).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Document field holding the ground-truth labels.
    pub label_field: String,

    /// Maximum number of term aggregations kept in the shared LRU cache.
    pub cache_capacity: usize,

    /// Bucket budget for the initial label-priors aggregation, issued before
    /// the true cardinality is known. Per-term aggregations are sized from
    /// the loaded universe instead.
    pub expected_label_cardinality: usize,

    /// Thread pool size for parallel term fetches.
    /// If None, uses the number of CPU cores.
    pub num_threads: Option<usize>,

    /// Scoring rule knobs.
    pub scoring: ScoringConfig,
}

impl ClassifierConfig {
    /// Default configuration for the given label field.
    pub fn new<S: Into<String>>(label_field: S) -> Self {
        ClassifierConfig {
            label_field: label_field.into(),
            cache_capacity: 10_000,
            expected_label_cardinality: 1024,
            num_threads: None,
            scoring: ScoringConfig::default(),
        }
    }

    /// Set the cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the fetch thread pool size.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Set the scoring knobs.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }
}
