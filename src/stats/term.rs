//! Term statistics and derived conditional probabilities.

use ahash::AHashMap;

use crate::corpus::LabelAggregation;
use crate::labels::LabelPriors;

/// Label-frequency statistics for one analyzed term.
///
/// The count table is zero-filled across the whole label universe, so a
/// lookup never distinguishes "label absent from the aggregation" from
/// "label with zero matching documents". Instances are immutable once built
/// and scoped to the prediction request that produced them; only the raw
/// aggregation behind them is shared, via the term cache.
#[derive(Clone, Debug, PartialEq)]
pub struct TermStats {
    term: String,
    doc_count: u64,
    label_counts: AHashMap<String, u64>,
}

impl TermStats {
    /// Build statistics from a raw aggregation result, zero-filled against
    /// the known label universe. Buckets for labels outside the universe
    /// carry no signal and are dropped.
    pub(crate) fn from_aggregation<S: Into<String>>(
        term: S,
        agg: &LabelAggregation,
        priors: &LabelPriors,
    ) -> Self {
        let mut label_counts: AHashMap<String, u64> = priors
            .labels()
            .map(|label| (label.to_string(), 0))
            .collect();

        for bucket in &agg.buckets {
            if let Some(count) = label_counts.get_mut(bucket.label.as_str()) {
                *count = bucket.count;
            }
        }

        TermStats {
            term: term.into(),
            doc_count: agg.total_docs,
            label_counts,
        }
    }

    /// The term these statistics describe.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Total number of training documents containing the term.
    ///
    /// Zero means the corpus has never seen the term; such terms contribute
    /// no signal to scoring.
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Fraction of the term's documents that carry `label`.
    ///
    /// Returns 0.0 for a label with no occurrences, for a label outside the
    /// universe, and for a term with no documents at all (the divide would
    /// otherwise be by zero).
    pub fn label_prob(&self, label: &str) -> f64 {
        if self.doc_count == 0 {
            return 0.0;
        }
        match self.label_counts.get(label) {
            Some(&count) => count as f64 / self.doc_count as f64,
            None => 0.0,
        }
    }

    /// Fraction of the term's documents that do not carry `label`.
    ///
    /// Guarded exactly like [`label_prob`](Self::label_prob).
    pub fn inverse_label_prob(&self, label: &str) -> f64 {
        if self.doc_count == 0 {
            return 0.0;
        }
        match self.label_counts.get(label) {
            Some(&count) => (self.doc_count - count) as f64 / self.doc_count as f64,
            None => 0.0,
        }
    }
}
