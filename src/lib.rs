//! # Doxa
//!
//! A probabilistic multi-label text classifier for indexed corpora.
//!
//! Doxa scores free text against the per-label term statistics of a training
//! corpus held in an external index. The index answers two questions
//! ("tokenize this text with the corpus analysis pipeline" and "how many
//! documents containing term T carry label L"), and the classifier turns
//! those answers into a ranked label distribution using a Naive-Bayes-style
//! log-odds rule.
//!
//! ## Features
//!
//! - Pluggable corpus backend (index + analyzer) behind a single trait
//! - Bounded LRU reuse of per-term aggregation results across requests
//! - Parallel term-statistics fetching on a dedicated thread pool
//! - Percent-of-max score normalization with a uniform fallback
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use doxa::classifier::{Classifier, ClassifierConfig};
//! use doxa::corpus::{CorpusBackend, LabelAggregation, LabelBucket, TermFilter, Token};
//! use doxa::error::Result;
//!
//! // A two-document corpus: "growth" appears only in earnings documents.
//! struct TinyCorpus;
//!
//! impl CorpusBackend for TinyCorpus {
//!     fn analyze(&self, _field: &str, text: &str) -> Result<Vec<Token>> {
//!         Ok(text
//!             .split_whitespace()
//!             .enumerate()
//!             .map(|(position, word)| Token::new(word.to_lowercase(), position))
//!             .collect())
//!     }
//!
//!     fn label_counts(
//!         &self,
//!         filter: Option<&TermFilter>,
//!         _label_field: &str,
//!         _min_buckets: usize,
//!     ) -> Result<LabelAggregation> {
//!         Ok(match filter {
//!             None => LabelAggregation {
//!                 total_docs: 2,
//!                 buckets: vec![
//!                     LabelBucket::new("earn", 1),
//!                     LabelBucket::new("grain", 1),
//!                 ],
//!             },
//!             Some(f) if f.term == "growth" => LabelAggregation {
//!                 total_docs: 1,
//!                 buckets: vec![LabelBucket::new("earn", 1)],
//!             },
//!             Some(_) => LabelAggregation::default(),
//!         })
//!     }
//! }
//!
//! let classifier = Classifier::new(Arc::new(TinyCorpus), ClassifierConfig::new("topics"))?;
//! let prediction = classifier.predict("growth", "body")?;
//! assert_eq!(prediction.top().unwrap().label, "earn");
//! # Ok::<(), doxa::error::DoxaError>(())
//! ```

pub mod cache;
pub mod classifier;
pub mod collection;
pub mod corpus;
pub mod error;
pub mod labels;
pub mod stats;

pub mod prelude {
    //! Convenient re-exports for typical classifier usage.

    pub use crate::classifier::{Classifier, ClassifierConfig, LabelScore, Prediction};
    pub use crate::collection::ScoringConfig;
    pub use crate::corpus::{CorpusBackend, LabelAggregation, LabelBucket, TermFilter, Token};
    pub use crate::error::{DoxaError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
