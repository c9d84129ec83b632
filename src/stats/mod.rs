//! Per-term label-frequency statistics.
//!
//! For each analyzed term the classifier needs two numbers per label: how
//! many training documents contain the term at all, and how many of those
//! carry the label. [`TermStats`] holds the answers; [`StatsFetcher`]
//! obtains them, consulting the shared cache before the backend and farming
//! uncached terms out to a bounded thread pool.

mod fetch;
mod term;

pub use fetch::StatsFetcher;
pub use term::TermStats;
