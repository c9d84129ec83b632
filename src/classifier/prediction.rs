//! Prediction results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Score assigned to one label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// The label value.
    pub label: String,

    /// Raw logistic score in (0, 1), or a percentage in [0, 100] after
    /// normalization.
    pub score: f64,
}

/// A ranked label distribution for one piece of input text.
///
/// Scores descend; equal scores order ascending by label key, so rankings
/// are reproducible from run to run. The labels are exactly the universe the
/// classifier was constructed with, no more and no fewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    scores: Vec<LabelScore>,
    normalized: bool,
}

impl Prediction {
    pub(crate) fn new(mut scores: Vec<LabelScore>, normalized: bool) -> Self {
        scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.label.cmp(&b.label))
        });
        Prediction { scores, normalized }
    }

    /// The best-scoring label, if the universe is non-empty.
    pub fn top(&self) -> Option<&LabelScore> {
        self.scores.first()
    }

    /// The score for a specific label, if it belongs to the universe.
    pub fn score(&self, label: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.score)
    }

    /// Whether scores were rescaled to percent-of-max.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Number of scored labels.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check whether the prediction holds no labels.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate the scores in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, LabelScore> {
        self.scores.iter()
    }
}

impl IntoIterator for Prediction {
    type Item = LabelScore;
    type IntoIter = std::vec::IntoIter<LabelScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}

impl<'a> IntoIterator for &'a Prediction {
    type Item = &'a LabelScore;
    type IntoIter = std::slice::Iter<'a, LabelScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.iter()
    }
}
