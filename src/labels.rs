//! Label prior registry.
//!
//! The set of known label values and their document frequencies is computed
//! once, at classifier construction, from a single unfiltered aggregation.
//! It is the fixed label universe for the classifier's lifetime: every
//! prediction scores exactly these labels, and every per-term count table is
//! zero-filled against them.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::{CorpusBackend, LabelAggregation};
use crate::error::{DoxaError, Result};

/// Prior statistics for a single label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelPrior {
    /// Number of training documents carrying the label.
    pub count: u64,

    /// `count / total_docs`.
    pub prob: f64,
}

/// The fixed label universe of a classifier instance.
///
/// Immutable once loaded and shared across prediction requests through
/// `Arc`, so no synchronization is needed after construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelPriors {
    total_docs: u64,
    priors: AHashMap<String, LabelPrior>,
}

impl LabelPriors {
    /// Load the label universe from the backend.
    ///
    /// `min_buckets` is the bucket budget for the aggregation; callers pass
    /// their expected label cardinality since the true cardinality is not
    /// known before this very query.
    ///
    /// # Errors
    ///
    /// Fails with [`DoxaError::Label`] when the corpus holds no documents or
    /// the label field has no values; a classifier without labels cannot
    /// serve predictions, so this is caught at construction rather than at
    /// prediction time.
    pub fn load(
        backend: &dyn CorpusBackend,
        label_field: &str,
        min_buckets: usize,
    ) -> Result<Self> {
        let agg = backend.label_counts(None, label_field, min_buckets)?;
        let priors = Self::from_aggregation(label_field, &agg)?;
        info!(
            label_field,
            labels = priors.cardinality(),
            total_docs = priors.total_docs(),
            "label priors loaded"
        );
        Ok(priors)
    }

    pub(crate) fn from_aggregation(label_field: &str, agg: &LabelAggregation) -> Result<Self> {
        if agg.total_docs == 0 {
            return Err(DoxaError::label(format!(
                "no training documents behind label field '{label_field}'"
            )));
        }
        if agg.buckets.is_empty() {
            return Err(DoxaError::label(format!(
                "label field '{label_field}' has no values"
            )));
        }

        let total_docs = agg.total_docs;
        let mut priors = AHashMap::with_capacity(agg.buckets.len());
        for bucket in &agg.buckets {
            priors.insert(
                bucket.label.clone(),
                LabelPrior {
                    count: bucket.count,
                    prob: bucket.count as f64 / total_docs as f64,
                },
            );
        }

        Ok(LabelPriors { total_docs, priors })
    }

    /// Total number of training documents in the corpus.
    pub fn total_docs(&self) -> u64 {
        self.total_docs
    }

    /// Number of known labels.
    pub fn cardinality(&self) -> usize {
        self.priors.len()
    }

    /// Check whether `label` belongs to the universe.
    pub fn contains(&self, label: &str) -> bool {
        self.priors.contains_key(label)
    }

    /// Prior statistics for `label`, if known.
    pub fn prior(&self, label: &str) -> Option<LabelPrior> {
        self.priors.get(label).copied()
    }

    /// Iterate over the known label keys (unordered).
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.priors.keys().map(|label| label.as_str())
    }

    /// Iterate over labels and their priors (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelPrior)> {
        self.priors
            .iter()
            .map(|(label, prior)| (label.as_str(), prior))
    }
}
