use std::sync::atomic::{AtomicU64, Ordering};

use ahash::RandomState;
use dashmap::DashMap;

/// keep document count and document frequencies in a thread-safe way
///
/// Every document registers its *set* of terms once, so a term repeated
/// inside one document still counts as one document.
#[derive(Debug, Default)]
pub struct Corpus {
    /// number of registered documents
    pub doc_num: AtomicU64,
    /// documents containing each term
    pub term_counts: DashMap<Box<str>, u64, RandomState>,
}

impl Clone for Corpus {
    fn clone(&self) -> Self {
        Self {
            doc_num: AtomicU64::new(self.doc_num.load(Ordering::Acquire)),
            term_counts: self.term_counts.clone(),
        }
    }
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: AtomicU64::new(0),
            term_counts: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Register one document by its distinct terms
    /// An empty set still counts as a document.
    pub fn add_set<I, T>(&self, terms: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.doc_num.fetch_add(1, Ordering::Relaxed);
        for term in terms {
            self.term_counts
                .entry(term.as_ref().into())
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
    }

    /// Get the number of documents in the corpus
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num.load(Ordering::Relaxed)
    }

    /// Get the document frequency of a term
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).map_or(0, |count| *count)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn set_semantics_per_document() {
        let corpus = Corpus::new();
        corpus.add_set(["alpha", "beta"]);
        corpus.add_set(["alpha"]);
        corpus.add_set(Vec::<&str>::new());
        assert_eq!(corpus.get_doc_num(), 3);
        assert_eq!(corpus.get_term_count("alpha"), 2);
        assert_eq!(corpus.get_term_count("beta"), 1);
        assert_eq!(corpus.get_term_count("gamma"), 0);
        assert_eq!(corpus.vocab_size(), 2);
    }

    #[test]
    fn concurrent_registration_is_order_independent() {
        let corpus = Corpus::new();
        (0..200u32).into_par_iter().for_each(|i| {
            if i % 2 == 0 {
                corpus.add_set(["even", "all"]);
            } else {
                corpus.add_set(["all"]);
            }
        });
        assert_eq!(corpus.get_doc_num(), 200);
        assert_eq!(corpus.get_term_count("all"), 200);
        assert_eq!(corpus.get_term_count("even"), 100);
    }
}
