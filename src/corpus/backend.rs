//! Core backend trait definition.

use crate::corpus::types::{LabelAggregation, TermFilter, Token};
use crate::error::Result;

/// Trait for corpus backends holding the training documents.
///
/// Implementations wrap whatever indexed store the corpus lives in. The
/// classifier treats the backend as opaque: it never sees documents, only
/// analysis output and aggregated label counts.
///
/// # Thread Safety
///
/// The trait requires `Send + Sync` so term statistics for distinct terms
/// can be fetched concurrently from the classifier's thread pool.
pub trait CorpusBackend: Send + Sync {
    /// Analyze `text` with the analysis pipeline configured for `field`.
    ///
    /// Must be deterministic: identical input and identical analyzer
    /// configuration produce an identical token sequence.
    ///
    /// # Errors
    ///
    /// Returns [`DoxaError::Backend`](crate::error::DoxaError::Backend) when
    /// the backend cannot be reached, or
    /// [`DoxaError::Analysis`](crate::error::DoxaError::Analysis) when the
    /// analysis request itself fails.
    fn analyze(&self, field: &str, text: &str) -> Result<Vec<Token>>;

    /// Count documents grouped by the values of `label_field`.
    ///
    /// With `filter` set, only documents whose analyzed text field contains
    /// the filter term are counted; with `None`, the whole corpus is. The
    /// unfiltered form is used once per classifier to load label priors.
    ///
    /// `min_buckets` is the minimum number of label buckets the result must
    /// be able to carry. Implementations must not truncate below it: an
    /// undersized bucket budget silently drops rare labels, which corrupts
    /// every downstream probability.
    fn label_counts(
        &self,
        filter: Option<&TermFilter>,
        label_field: &str,
        min_buckets: usize,
    ) -> Result<LabelAggregation>;
}
