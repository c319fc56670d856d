pub mod abbreviation;
pub mod corpus;
pub mod ranking;
pub mod serde;
pub mod term;
pub mod tfidf;
pub mod tokenize;

use std::{marker::PhantomData, sync::Arc};

use ::serde::{Deserialize, Serialize};
use rayon::prelude::*;
use regex::Regex;

use crate::{
    capability::Morphology,
    config::TermConfig,
    error::AnalysisResult,
    lexicon::Lexicons,
    vectorizer::{
        abbreviation::AbbreviationRecord,
        corpus::Corpus,
        ranking::{MaxPool, RankedTerms},
        term::TermFrequency,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    },
};

/// One ranked term of the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCandidate {
    /// surface form; n-grams are joined by a single space
    pub term: String,
    /// number of words (1, 2 or 3)
    pub n: usize,
    /// best single-document TF-IDF score
    pub tfidf_score: f64,
    pub in_domain: bool,
}

/// Complete terminological index of a corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermIndex {
    pub terms: Vec<TermCandidate>,
    pub bigrams: Vec<TermCandidate>,
    pub trigrams: Vec<TermCandidate>,
    pub abbreviations: Vec<AbbreviationRecord>,
    /// domain bucket then other bucket, truncated to the configured limit
    pub all_terms: Vec<TermCandidate>,
    pub total: usize,
    pub domain_count: usize,
}

/// List sizes of a [`TermIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermIndexSummary {
    pub terms: usize,
    pub bigrams: usize,
    pub trigrams: usize,
    pub abbreviations: usize,
    pub total: usize,
    pub domain_count: usize,
}

impl TermIndex {
    /// Merge the per-category lists into the diversified view
    pub fn assemble(
        terms: Vec<TermCandidate>,
        bigrams: Vec<TermCandidate>,
        trigrams: Vec<TermCandidate>,
        abbreviations: Vec<AbbreviationRecord>,
        top_terms_limit: usize,
    ) -> Self {
        let candidates = || terms.iter().chain(&bigrams).chain(&trigrams);
        let domain_count = candidates().filter(|c| c.in_domain).count();
        let all_terms = ranking::diversify(candidates().cloned(), top_terms_limit);
        let total = terms.len() + bigrams.len() + trigrams.len() + abbreviations.len();
        Self {
            terms,
            bigrams,
            trigrams,
            abbreviations,
            all_terms,
            total,
            domain_count,
        }
    }

    pub fn summary(&self) -> TermIndexSummary {
        TermIndexSummary {
            terms: self.terms.len(),
            bigrams: self.bigrams.len(),
            trigrams: self.trigrams.len(),
            abbreviations: self.abbreviations.len(),
            total: self.total,
            domain_count: self.domain_count,
        }
    }
}

/// Builds the terminological index of a corpus
///
/// Holds the read-only lexicons, the morphological capability used for the
/// part-of-speech filter, and the TF-IDF engine `E`.
///
/// Every extraction is a batch over the whole corpus:
/// 1. documents are tokenized in parallel
/// 2. document frequencies are registered in a shared [`Corpus`]
/// 3. every document scores its own terms in parallel
/// 4. the per-document scores are reduced in document order, keeping the
///    maximum per term ([`MaxPool`])
#[derive(Debug)]
pub struct TermIndexBuilder<M, E = DefaultTFIDFEngine>
where
    M: Morphology,
    E: TFIDFEngine + Send + Sync,
{
    morphology: M,
    lexicons: Arc<Lexicons>,
    config: TermConfig,
    term_word_re: Regex,
    _marker: PhantomData<E>,
}

impl<M> TermIndexBuilder<M, DefaultTFIDFEngine>
where
    M: Morphology,
{
    /// Create a builder with the default TF-IDF engine
    pub fn new(morphology: M, lexicons: Arc<Lexicons>, config: TermConfig) -> AnalysisResult<Self> {
        Self::with_engine(morphology, lexicons, config)
    }
}

impl<M, E> TermIndexBuilder<M, E>
where
    M: Morphology,
    E: TFIDFEngine + Send + Sync,
{
    /// Create a builder with a custom TF-IDF engine
    pub fn with_engine(morphology: M, lexicons: Arc<Lexicons>, config: TermConfig) -> AnalysisResult<Self> {
        let term_word_re = tokenize::term_word_regex(config.min_word_length)?;
        Ok(Self {
            morphology,
            lexicons,
            config,
            term_word_re,
            _marker: PhantomData,
        })
    }

    pub fn config(&self) -> &TermConfig {
        &self.config
    }

    /// Run all extractions and merge them into a [`TermIndex`]
    pub fn build_index<T>(&self, texts: &[T]) -> TermIndex
    where
        T: AsRef<str> + Sync,
    {
        let ((terms, bigrams), (trigrams, abbreviations)) = rayon::join(
            || rayon::join(|| self.extract_unigrams(texts), || self.extract_ngrams(texts, 2)),
            || rayon::join(|| self.extract_ngrams(texts, 3), || self.extract_abbreviations(texts)),
        );
        let index = TermIndex::assemble(terms, bigrams, trigrams, abbreviations, self.config.top_terms_limit);
        tracing::info!(
            documents = texts.len(),
            terms = index.terms.len(),
            bigrams = index.bigrams.len(),
            trigrams = index.trigrams.len(),
            abbreviations = index.abbreviations.len(),
            domain = index.domain_count,
            "term index built"
        );
        index
    }

    /// Single-word terms
    ///
    /// Only nouns and adjectives are scored. A document whose part-of-speech
    /// lookup fails contributes no scores (it still counts for document
    /// frequency).
    pub fn extract_unigrams<T>(&self, texts: &[T]) -> Vec<TermCandidate>
    where
        T: AsRef<str> + Sync,
    {
        let docs: Vec<TermFrequency> = texts
            .par_iter()
            .map(|text| {
                let lowered = text.as_ref().to_lowercase();
                TermFrequency::from(&tokenize::words(&self.term_word_re, &lowered)[..])
            })
            .collect();
        let corpus = register(&docs);

        let pools: Vec<Option<MaxPool<String>>> = docs
            .par_iter()
            .enumerate()
            .map(|(idx, freq)| match self.score_unigrams(freq, &corpus) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::warn!(document = idx, "skipping document in term extraction: {e}");
                    None
                }
            })
            .collect();
        self.rank(pools.into_iter().flatten(), 1)
    }

    /// Contiguous `n`-word terms
    ///
    /// An n-gram is only scored in documents where it occurs at least
    /// `min_ngram_frequency` times. There is no part-of-speech filter.
    pub fn extract_ngrams<T>(&self, texts: &[T], n: usize) -> Vec<TermCandidate>
    where
        T: AsRef<str> + Sync,
    {
        let docs: Vec<TermFrequency> = texts
            .par_iter()
            .map(|text| {
                let lowered = text.as_ref().to_lowercase();
                let words = tokenize::ngram_words(&lowered);
                TermFrequency::from(&tokenize::ngrams(&words, n)[..])
            })
            .collect();
        let corpus = register(&docs);

        let min_frequency = self.config.min_ngram_frequency;
        let pools: Vec<MaxPool<String>> = docs
            .par_iter()
            .map(|freq| {
                let mut pool = MaxPool::new();
                for (gram, count) in freq.iter() {
                    if count < min_frequency {
                        continue;
                    }
                    pool.offer(gram.to_string(), self.score(freq, &corpus, gram));
                }
                pool
            })
            .collect();
        self.rank(pools, n)
    }

    /// Abbreviations with their expansions, read from unprocessed text
    pub fn extract_abbreviations<T>(&self, texts: &[T]) -> Vec<AbbreviationRecord>
    where
        T: AsRef<str> + Sync,
    {
        abbreviation::extract_abbreviations(texts, &self.lexicons.abbreviation_stopwords)
    }

    fn score_unigrams(&self, freq: &TermFrequency, corpus: &Corpus) -> AnalysisResult<MaxPool<String>> {
        let mut pool = MaxPool::new();
        for term in freq.term_set_iter() {
            if !self.morphology.part_of_speech(term)?.is_term_head() {
                continue;
            }
            pool.offer(term.to_string(), self.score(freq, corpus, term));
        }
        Ok(pool)
    }

    #[inline]
    fn score(&self, freq: &TermFrequency, corpus: &Corpus, term: &str) -> f64 {
        let score = E::tf_idf(freq, corpus, term);
        if self.lexicons.domain_terms.contains(term) {
            score * self.config.domain_boost
        } else {
            score
        }
    }

    /// Reduce per-document pools (in document order) into a ranked list
    fn rank<I>(&self, pools: I, n: usize) -> Vec<TermCandidate>
    where
        I: IntoIterator<Item = MaxPool<String>>,
    {
        let pool = pools.into_iter().fold(MaxPool::new(), |mut acc, pool| {
            acc.merge(pool);
            acc
        });
        let candidates = pool
            .into_vec()
            .into_iter()
            .map(|(term, tfidf_score)| TermCandidate {
                in_domain: self.lexicons.domain_terms.contains(&term),
                term,
                n,
                tfidf_score,
            })
            .collect();
        let mut ranked = RankedTerms::new(candidates);
        ranked.sort_by_score().retain_positive();
        ranked.into_vec()
    }
}

/// Register every document's term set for document frequency
fn register(docs: &[TermFrequency]) -> Corpus {
    let corpus = Corpus::new();
    docs.par_iter().for_each(|freq| corpus.add_set(freq.term_set_iter()));
    tracing::debug!(
        documents = corpus.get_doc_num(),
        vocabulary = corpus.vocab_size(),
        "document frequencies registered"
    );
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        capability::{fixtures::FixtureMorphology, PartOfSpeech},
        lexicon::LexiconSet,
        vectorizer::serde::CborSnapshot,
    };

    fn builder(morph: FixtureMorphology, domain: &[&str]) -> TermIndexBuilder<FixtureMorphology> {
        let lexicons = Lexicons {
            domain_terms: domain.iter().copied().collect(),
            abbreviation_stopwords: LexiconSet::parse("THE"),
            ..Lexicons::default()
        };
        TermIndexBuilder::new(morph, Arc::new(lexicons), TermConfig::default()).unwrap()
    }

    fn find<'a>(list: &'a [TermCandidate], term: &str) -> Option<&'a TermCandidate> {
        list.iter().find(|c| c.term == term)
    }

    #[test]
    fn single_document_term_scores_its_own_tf_idf() {
        let b = builder(FixtureMorphology::new(), &[]);
        let terms = b.extract_unigrams(&["кластер", "другие слова тут"]);
        // df = 1, tf = 1/1, idf = ln(2/1) + 1
        let c = find(&terms, "кластер").unwrap();
        assert!((c.tfidf_score - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(c.n, 1);
        assert!(!c.in_domain);
    }

    #[test]
    fn score_is_max_over_documents_not_sum() {
        let b = builder(FixtureMorphology::new(), &[]);
        let texts = [
            "graph",
            "graph tree tree tree",
            "graph tree tree tree node node node node",
        ];
        let terms = b.extract_unigrams(&texts);
        // graph is in every document: idf = 1, best tf = 1/1
        let graph = find(&terms, "graph").unwrap();
        assert!((graph.tfidf_score - 1.0).abs() < 1e-12);
        // tree: df = 2, best tf = 3/4
        let tree = find(&terms, "tree").unwrap();
        let expected = 0.75 * ((3.0f64 / 2.0).ln() + 1.0);
        assert!((tree.tfidf_score - expected).abs() < 1e-12);
        // short document dominates
        assert_eq!(terms[0].term, "tree");
    }

    #[test]
    fn pos_filter_drops_words_entirely() {
        let morph = FixtureMorphology::new().with_pos("run", PartOfSpeech::Verb);
        let b = builder(morph, &[]);
        let terms = b.extract_unigrams(&["run fast model", "model"]);
        assert!(find(&terms, "run").is_none());
        assert!(find(&terms, "fast").is_some());
        // tf still counts the dropped word in the document length
        let fast = find(&terms, "fast").unwrap();
        assert!((fast.tfidf_score - (1.0 / 3.0) * (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn domain_terms_are_boosted_and_flagged() {
        let b = builder(FixtureMorphology::new(), &["алгоритм"]);
        let terms = b.extract_unigrams(&["алгоритм данные"]);
        let boosted = find(&terms, "алгоритм").unwrap();
        let plain = find(&terms, "данные").unwrap();
        assert!(boosted.in_domain);
        assert!((boosted.tfidf_score - 2.0 * plain.tfidf_score).abs() < 1e-12);
    }

    #[test]
    fn words_shorter_than_three_letters_are_ignored() {
        let b = builder(FixtureMorphology::new(), &[]);
        let terms = b.extract_unigrams(&["an ox ate hay"]);
        let names: Vec<&str> = terms.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(names, vec!["ate", "hay"]);
    }

    #[test]
    fn failing_document_is_skipped_not_fatal() {
        let morph = FixtureMorphology::new().failing_on("broken");
        let b = builder(morph, &[]);
        let terms = b.extract_unigrams(&["broken words here", "fine words"]);
        assert!(find(&terms, "broken").is_none());
        assert!(find(&terms, "here").is_none());
        assert!(find(&terms, "fine").is_some());
        // "words" only scored from the surviving document
        let words = find(&terms, "words").unwrap();
        assert!((words.tfidf_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ngrams_need_the_per_document_minimum() {
        let b = builder(FixtureMorphology::new(), &[]);
        let texts = [
            "neural network neural network neural network",
            "neural network once",
        ];
        let bigrams = b.extract_ngrams(&texts, 2);
        let nn = find(&bigrams, "neural network").unwrap();
        // doc 0: 3 of 5 bigrams, df = 2 -> idf = 1
        assert!((nn.tfidf_score - 0.6).abs() < 1e-12);
        assert_eq!(nn.n, 2);
        // "network neural" occurs twice only
        assert!(find(&bigrams, "network neural").is_none());
        assert!(find(&bigrams, "network once").is_none());
    }

    #[test]
    fn trigrams_use_short_words_too() {
        let b = builder(FixtureMorphology::new(), &["a of b"]);
        let texts = ["a of b a of b a of b"];
        let trigrams = b.extract_ngrams(&texts, 3);
        let t = find(&trigrams, "a of b").unwrap();
        assert!(t.in_domain);
        // 3 of 7 trigrams, single document -> idf = 1, boost 2
        assert!((t.tfidf_score - 2.0 * 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn build_index_merges_buckets_domain_first() {
        let b = builder(FixtureMorphology::new(), &["rare"]);
        let texts = [
            "common common common common common common common common common rare",
            "common words",
        ];
        let index = b.build_index(&texts);
        let rare = find(&index.terms, "rare").unwrap();
        let words = find(&index.terms, "words").unwrap();
        assert!(rare.tfidf_score < words.tfidf_score);
        assert_eq!(index.all_terms[0].term, "rare");
        assert_eq!(index.domain_count, 1);
        assert_eq!(index.total, index.terms.len() + index.bigrams.len() + index.trigrams.len() + index.abbreviations.len());
    }

    #[test]
    fn all_terms_is_truncated_but_lists_are_not() {
        let lexicons = Arc::new(Lexicons::default());
        let config = TermConfig {
            top_terms_limit: 2,
            ..TermConfig::default()
        };
        let b = TermIndexBuilder::new(FixtureMorphology::new(), lexicons, config).unwrap();
        let index = b.build_index(&["alpha beta gamma delta"]);
        assert_eq!(index.terms.len(), 4);
        assert_eq!(index.all_terms.len(), 2);
        assert_eq!(index.summary().terms, 4);
    }

    #[test]
    fn build_index_collects_abbreviations() {
        let b = builder(FixtureMorphology::new(), &[]);
        let index = b.build_index(&["THE (article) NLP (natural language processing)"]);
        assert_eq!(index.abbreviations.len(), 1);
        assert_eq!(index.abbreviations[0].abbreviation, "NLP");
    }

    #[test]
    fn empty_corpus_builds_an_empty_index() {
        let b = builder(FixtureMorphology::new(), &[]);
        let texts: [&str; 0] = [];
        let index = b.build_index(&texts);
        assert_eq!(index, TermIndex::default());
    }

    #[test]
    fn repeated_builds_are_byte_identical() {
        let b = builder(FixtureMorphology::new(), &["модель", "neural network"]);
        let texts = [
            "Модель обучения. Neural network neural network neural network модель данные.",
            "Данные и модель. Система управления (СУ) и NLP (natural language processing).",
            "tie one tie two tie three",
            "",
        ];
        let first = b.build_index(&texts).to_cbor().unwrap();
        let second = b.build_index(&texts).to_cbor().unwrap();
        assert_eq!(first, second);
    }
}
