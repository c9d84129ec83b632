//! Contract with the corpus backend.
//!
//! The training corpus lives in an external indexed store that also owns the
//! text analysis pipeline (lowercasing, stop word removal, stemming,
//! negation-scope marking). The classifier never looks inside it; everything
//! it needs is expressed as two queries on the [`CorpusBackend`] trait:
//!
//! ```text
//! Raw text ──> analyze(field, text) ──────────> ordered normalized tokens
//! Term     ──> label_counts(filter, field, n) ─> (total docs, label → count)
//! ```
//!
//! The unfiltered form of `label_counts` is issued once per classifier to
//! load the label universe; the filtered form is issued per uncached term.

mod backend;
mod types;

pub use backend::CorpusBackend;
pub use types::{LabelAggregation, LabelBucket, TermFilter, Token};
