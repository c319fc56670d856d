use crate::vectorizer::{corpus::Corpus, term::TermFrequency};

/// TF-IDF calculation engine
///
/// Plugged into [`crate::TermIndexBuilder`] as a type parameter, so a
/// different weighting can be swapped in without touching the index logic.
pub trait TFIDFEngine {
    /// Term frequency of `term` inside one document
    /// # Arguments
    /// * `freq` - counts of the document
    /// * `term` - term to weigh
    fn tf(freq: &TermFrequency, term: &str) -> f64;

    /// Inverse document frequency of `term` over the corpus
    fn idf(corpus: &Corpus, term: &str) -> f64;

    #[inline]
    fn tf_idf(freq: &TermFrequency, corpus: &Corpus, term: &str) -> f64 {
        Self::tf(freq, term) * Self::idf(corpus, term)
    }
}

/// Default engine
/// - `tf = count / total terms in the document`
/// - `idf = ln(doc_num / df) + 1`, `0` for a term no document contains
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(freq: &TermFrequency, term: &str) -> f64 {
        let total = freq.term_sum();
        if total == 0 {
            return 0.0;
        }
        freq.term_count(term) as f64 / total as f64
    }

    #[inline]
    fn idf(corpus: &Corpus, term: &str) -> f64 {
        let doc_freq = corpus.get_term_count(term);
        if doc_freq == 0 {
            return 0.0;
        }
        (corpus.get_doc_num() as f64 / doc_freq as f64).ln() + 1.0
    }
}
