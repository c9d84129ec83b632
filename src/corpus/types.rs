//! Data types crossing the corpus-backend boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized token produced by the backend's analysis pipeline.
///
/// The token text is the term identity. Analysis-side transforms are already
/// folded into `text`: a stemmed token reads `growth` for "growing", and a
/// negation-marked token reads `!good` for "not good", so differently
/// analyzed surface forms never collide downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Filter restricting an aggregation to the documents whose analyzed text
/// field contains a term.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermFilter {
    /// The analyzed text field the term must appear in.
    pub field: String,

    /// The term itself.
    pub term: String,
}

impl TermFilter {
    /// Create a new term filter.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        TermFilter {
            field: field.into(),
            term: term.into(),
        }
    }
}

/// One label bucket of an aggregation result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelBucket {
    /// The label value.
    pub label: String,

    /// Number of matching documents carrying the label.
    pub count: u64,
}

impl LabelBucket {
    /// Create a new label bucket.
    pub fn new<S: Into<String>>(label: S, count: u64) -> Self {
        LabelBucket {
            label: label.into(),
            count,
        }
    }
}

/// Raw result of a label-count aggregation.
///
/// This is the unit the term cache stores: serialized on first fetch and
/// reconstituted on later hits without another backend round trip. A term
/// the corpus has never seen yields `total_docs == 0` and no buckets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelAggregation {
    /// Number of documents matching the filter (all documents when
    /// unfiltered).
    pub total_docs: u64,

    /// Per-label document counts. Labels with no matching documents may be
    /// omitted; consumers zero-fill against their label universe.
    pub buckets: Vec<LabelBucket>,
}
