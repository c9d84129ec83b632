//! Cache-or-fetch retrieval of term statistics.

use std::sync::Arc;

use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cache::TermCache;
use crate::corpus::{CorpusBackend, LabelAggregation, TermFilter};
use crate::error::Result;
use crate::labels::LabelPriors;
use crate::stats::term::TermStats;

/// Resolves term statistics through the shared cache, farming distinct
/// terms out to a bounded thread pool.
///
/// One fetcher lives inside each classifier and is shared by all of its
/// prediction requests. The fetch stage is explicitly separate from
/// statistics construction: [`TermStats`] values are plain data, and all
/// backend traffic happens here.
pub struct StatsFetcher {
    backend: Arc<dyn CorpusBackend>,
    cache: Arc<TermCache>,
    priors: Arc<LabelPriors>,
    pool: Arc<ThreadPool>,
}

impl StatsFetcher {
    pub(crate) fn new(
        backend: Arc<dyn CorpusBackend>,
        cache: Arc<TermCache>,
        priors: Arc<LabelPriors>,
        pool: Arc<ThreadPool>,
    ) -> Self {
        StatsFetcher {
            backend,
            cache,
            priors,
            pool,
        }
    }

    pub(crate) fn backend(&self) -> &dyn CorpusBackend {
        self.backend.as_ref()
    }

    pub(crate) fn cache(&self) -> &TermCache {
        &self.cache
    }

    /// Resolve statistics for every term, preserving input order.
    ///
    /// Statistics for distinct terms are independent reads, so they are
    /// fetched concurrently on the pool. The first backend error aborts the
    /// batch; fetches already in flight run to completion and may still
    /// populate the cache, which is harmless.
    pub fn fetch_all(
        &self,
        label_field: &str,
        text_field: &str,
        terms: &[String],
    ) -> Result<Vec<TermStats>> {
        self.pool.install(|| {
            terms
                .par_iter()
                .map(|term| self.fetch(label_field, text_field, term))
                .collect()
        })
    }

    /// Resolve statistics for a single term, consulting the cache first.
    ///
    /// On a miss the raw aggregation is fetched with a bucket budget of the
    /// full label cardinality (an undersized budget would silently drop rare
    /// labels) and stored back for later requests.
    pub fn fetch(&self, label_field: &str, text_field: &str, term: &str) -> Result<TermStats> {
        if let Some(bytes) = self.cache.get(term) {
            match bincode::deserialize::<LabelAggregation>(&bytes) {
                Ok(agg) => {
                    debug!(term, "term cache hit");
                    return Ok(TermStats::from_aggregation(term, &agg, &self.priors));
                }
                Err(error) => {
                    // Undecodable entries behave like misses and get refetched.
                    warn!(term, error = %error, "discarding undecodable cache entry");
                }
            }
        }

        let filter = TermFilter::new(text_field, term);
        let agg =
            self.backend
                .label_counts(Some(&filter), label_field, self.priors.cardinality())?;
        debug!(term, total_docs = agg.total_docs, "term statistics fetched");

        match bincode::serialize(&agg) {
            Ok(bytes) => self.cache.put(term, bytes),
            Err(error) => warn!(term, error = %error, "failed to encode aggregation for cache"),
        }

        Ok(TermStats::from_aggregation(term, &agg, &self.priors))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::corpus::{LabelBucket, Token};
    use crate::error::DoxaError;

    /// Backend stub serving one fixed term aggregation and counting calls.
    struct CountingBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingBackend {
        fn new() -> Self {
            CountingBackend {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            CountingBackend {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CorpusBackend for CountingBackend {
        fn analyze(&self, _field: &str, text: &str) -> Result<Vec<Token>> {
            Ok(text
                .split_whitespace()
                .enumerate()
                .map(|(position, word)| Token::new(word, position))
                .collect())
        }

        fn label_counts(
            &self,
            filter: Option<&TermFilter>,
            _label_field: &str,
            min_buckets: usize,
        ) -> Result<LabelAggregation> {
            if filter.is_some() {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    return Err(DoxaError::backend("aggregation node down"));
                }
                // Per-term requests must budget for the whole universe.
                assert!(min_buckets >= 2);
            }
            Ok(LabelAggregation {
                total_docs: 12,
                buckets: vec![LabelBucket::new("earn", 10), LabelBucket::new("grain", 2)],
            })
        }
    }

    fn fetcher_over(backend: Arc<CountingBackend>) -> StatsFetcher {
        let priors = Arc::new(
            LabelPriors::from_aggregation(
                "topics",
                &LabelAggregation {
                    total_docs: 100,
                    buckets: vec![LabelBucket::new("earn", 60), LabelBucket::new("grain", 40)],
                },
            )
            .unwrap(),
        );
        let pool = Arc::new(
            rayon::ThreadPoolBuilder::new()
                .num_threads(2)
                .build()
                .unwrap(),
        );
        StatsFetcher::new(backend, Arc::new(TermCache::new(8)), priors, pool)
    }

    #[test]
    fn test_second_fetch_is_a_cache_hit() {
        let backend = Arc::new(CountingBackend::new());
        let fetcher = fetcher_over(Arc::clone(&backend));

        let first = fetcher.fetch("topics", "body", "growth").unwrap();
        let second = fetcher.fetch("topics", "body", "growth").unwrap();

        assert_eq!(backend.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(fetcher.cache().len(), 1);
    }

    #[test]
    fn test_corrupt_cache_entry_is_refetched() {
        let backend = Arc::new(CountingBackend::new());
        let fetcher = fetcher_over(Arc::clone(&backend));

        // Not a valid serialized aggregation.
        fetcher.cache().put("growth", vec![0xff]);

        let stats = fetcher.fetch("topics", "body", "growth").unwrap();
        assert_eq!(backend.calls(), 1);
        assert_eq!(stats.doc_count(), 12);

        // The refetch repaired the entry.
        let again = fetcher.fetch("topics", "body", "growth").unwrap();
        assert_eq!(backend.calls(), 1);
        assert_eq!(again, stats);
    }

    #[test]
    fn test_fetch_all_preserves_input_order() {
        let backend = Arc::new(CountingBackend::new());
        let fetcher = fetcher_over(backend);

        let terms: Vec<String> = ["alpha", "beta", "gamma"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        let stats = fetcher.fetch_all("topics", "body", &terms).unwrap();

        let fetched: Vec<&str> = stats.iter().map(|s| s.term()).collect();
        assert_eq!(fetched, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_backend_failure_surfaces_immediately() {
        let backend = Arc::new(CountingBackend::failing());
        let fetcher = fetcher_over(backend);

        let terms = vec!["growth".to_string()];
        let err = fetcher.fetch_all("topics", "body", &terms).unwrap_err();
        assert!(matches!(err, DoxaError::Backend(_)));
    }
}
