//! Term collections and log-odds label scoring.
//!
//! A [`TermCollection`] is the bag of distinct analyzed terms of one piece
//! of input text, with statistics already resolved, ready to be scored
//! against any label of the universe. This is where the Naive Bayes
//! arithmetic lives:
//!
//! ```text
//! for each term seen in training:
//!     p        = P(label | term)            (· prior, when enabled)
//!     log_sum += ln(1 - p) - ln(p)
//! score = 1 / (1 + e^log_sum)
//! ```
//!
//! Terms the corpus has never seen are skipped entirely; with nothing left
//! to sum, every label lands on exactly 0.5.

use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::labels::LabelPriors;
use crate::stats::{StatsFetcher, TermStats};

/// Probability floor replacing an exact zero before the log transform.
const PROB_FLOOR: f64 = 0.00001;

/// Probability ceiling replacing an exact one before the log transform.
const PROB_CEILING: f64 = 0.99999;

/// Knobs of the log-odds scoring rule.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Multiply each term probability by the label's prior probability.
    ///
    /// Off by default: the prior factor is deliberately fixed to 1, since
    /// the plain conditional probability alone tends to rank labels better
    /// on skewed corpora.
    pub use_label_prior: bool,

    /// Shrink rarely seen terms toward 0.5 with the given pseudo-count
    /// weight: a term seen in `n` documents scores
    /// `(w * 0.5 + n * p) / (w + n)`. Disabled by default.
    pub smoothing_weight: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            use_label_prior: false,
            smoothing_weight: None,
        }
    }
}

/// The distinct analyzed terms of one input text, with resolved statistics.
///
/// Collections are exclusively owned by the prediction request that built
/// them; only the term cache underneath is shared.
pub struct TermCollection {
    terms: Vec<TermStats>,
    priors: Arc<LabelPriors>,
    scoring: ScoringConfig,
}

impl TermCollection {
    /// Analyze `text` through the backend and resolve statistics for each
    /// distinct term.
    ///
    /// Duplicate tokens collapse to one term (first-seen order is kept), so
    /// a term contributes to a score once no matter how often it occurs in
    /// the input.
    pub(crate) fn collect(
        fetcher: &StatsFetcher,
        priors: Arc<LabelPriors>,
        scoring: ScoringConfig,
        label_field: &str,
        text_field: &str,
        text: &str,
    ) -> Result<Self> {
        let tokens = fetcher.backend().analyze(text_field, text)?;

        let mut seen = AHashSet::with_capacity(tokens.len());
        let mut distinct = Vec::with_capacity(tokens.len());
        for token in tokens {
            if seen.insert(token.text.clone()) {
                distinct.push(token.text);
            }
        }
        debug!(text_field, distinct_terms = distinct.len(), "terms collected");

        let terms = fetcher.fetch_all(label_field, text_field, &distinct)?;

        Ok(TermCollection {
            terms,
            priors,
            scoring,
        })
    }

    /// Number of distinct terms in the collection.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the collection holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The resolved term statistics, in first-seen order.
    pub fn terms(&self) -> &[TermStats] {
        &self.terms
    }

    /// Score one label against the collected terms.
    ///
    /// Returns a probability-like value in (0, 1). Terms with no training
    /// occurrences are skipped; if nothing remains the accumulated log sum
    /// is 0 and the score is exactly 0.5 for every label.
    pub fn score_label(&self, label: &str) -> f64 {
        let mut log_sum = 0.0;
        for term in &self.terms {
            let doc_count = term.doc_count();
            if doc_count == 0 {
                // Never seen in training: no signal either way.
                continue;
            }

            let mut p = term.label_prob(label);

            if self.scoring.use_label_prior {
                p *= self
                    .priors
                    .prior(label)
                    .map(|prior| prior.prob)
                    .unwrap_or(0.0);
            }

            if let Some(weight) = self.scoring.smoothing_weight {
                let n = doc_count as f64;
                p = (weight * 0.5 + n * p) / (weight + n);
            }

            let p = p.clamp(PROB_FLOOR, PROB_CEILING);
            log_sum += (1.0 - p).ln() - p.ln();
        }

        1.0 / (1.0 + log_sum.exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{LabelAggregation, LabelBucket};

    fn universe() -> Arc<LabelPriors> {
        let agg = LabelAggregation {
            total_docs: 100,
            buckets: vec![LabelBucket::new("earn", 60), LabelBucket::new("grain", 40)],
        };
        Arc::new(LabelPriors::from_aggregation("topics", &agg).unwrap())
    }

    fn growth_stats() -> TermStats {
        let agg = LabelAggregation {
            total_docs: 12,
            buckets: vec![LabelBucket::new("earn", 10), LabelBucket::new("grain", 2)],
        };
        TermStats::from_aggregation("growth", &agg, &universe())
    }

    fn unseen_stats() -> TermStats {
        TermStats::from_aggregation("xylyl", &LabelAggregation::default(), &universe())
    }

    fn collection(terms: Vec<TermStats>, scoring: ScoringConfig) -> TermCollection {
        TermCollection {
            terms,
            priors: universe(),
            scoring,
        }
    }

    #[test]
    fn test_single_term_favors_its_dominant_label() {
        let coll = collection(vec![growth_stats()], ScoringConfig::default());

        let earn = coll.score_label("earn");
        let grain = coll.score_label("grain");

        // p = 10/12 for earn: log_sum = ln(1/6) - ln(5/6) < 0, score > 0.5.
        assert!(earn > 0.5, "earn scored {earn}");
        assert!(grain < 0.5, "grain scored {grain}");
        assert!((earn - 10.0 / 12.0).abs() < 1e-9);
        assert!((grain - 2.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_unseen_terms_are_skipped() {
        let coll = collection(
            vec![unseen_stats(), growth_stats()],
            ScoringConfig::default(),
        );

        // The unseen term must not drag the score toward the floor clamp.
        assert!((coll.score_label("earn") - 10.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_unseen_terms_score_half_everywhere() {
        let coll = collection(
            vec![unseen_stats(), unseen_stats()],
            ScoringConfig::default(),
        );

        assert_eq!(coll.score_label("earn"), 0.5);
        assert_eq!(coll.score_label("grain"), 0.5);
    }

    #[test]
    fn test_empty_collection_scores_half_everywhere() {
        let coll = collection(vec![], ScoringConfig::default());

        assert_eq!(coll.score_label("earn"), 0.5);
        assert!(coll.is_empty());
    }

    #[test]
    fn test_zero_probability_is_clamped_not_infinite() {
        // "growth" never occurs in grain-only documents with these counts.
        let agg = LabelAggregation {
            total_docs: 10,
            buckets: vec![LabelBucket::new("earn", 10)],
        };
        let stats = TermStats::from_aggregation("growth", &agg, &universe());
        let coll = collection(vec![stats], ScoringConfig::default());

        let score = coll.score_label("grain");
        assert!(score.is_finite());
        assert!(score > 0.0 && score < 0.5);
    }

    #[test]
    fn test_label_prior_toggle_shifts_scores() {
        let plain = collection(vec![growth_stats()], ScoringConfig::default());
        let with_prior = collection(
            vec![growth_stats()],
            ScoringConfig {
                use_label_prior: true,
                smoothing_weight: None,
            },
        );

        // Multiplying by prob(earn) = 0.6 shrinks p below 10/12.
        assert!(with_prior.score_label("earn") < plain.score_label("earn"));
    }

    #[test]
    fn test_smoothing_pulls_rare_terms_toward_half() {
        let smoothed = collection(
            vec![growth_stats()],
            ScoringConfig {
                use_label_prior: false,
                smoothing_weight: Some(5.0),
            },
        );
        let plain = collection(vec![growth_stats()], ScoringConfig::default());

        let smoothed_earn = smoothed.score_label("earn");
        let plain_earn = plain.score_label("earn");
        assert!(smoothed_earn < plain_earn);
        assert!(smoothed_earn > 0.5);
    }
}
