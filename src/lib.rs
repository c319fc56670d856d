//! This crate builds the indexes of a document corpus: frequency statistics,
//! a terminological index and a named-entity index.

pub mod capability;
pub mod config;
pub mod document;
pub mod entity;
pub mod error;
pub mod frequency;
pub mod lexicon;
pub mod pipeline;
pub mod preprocess;
pub mod vectorizer;

/// Corpus Analyzer
/// The top-level struct of this crate. It owns the configuration, the
/// lexicons and both external capabilities, and runs every engine over one
/// document collection.
///
/// The result is a `CorpusReport` holding:
/// - The frequency statistics (Zipf ranks, diversity, core lexicon)
/// - The terminological index
/// - The named-entity index
///
/// `CorpusAnalyzer<M, T>` has the following generic parameters:
/// - `M`: morphological analyzer (`Morphology`), shared through `Arc<M>`
/// - `T`: named-entity tagger (`EntityTagger`)
pub use pipeline::{CorpusAnalyzer, CorpusReport};

/// Frequency Engine
/// Rank-frequency statistics over lemmatized documents.
/// Computes text volume M, vocabulary volume N, lexical diversity K_R,
/// informativity K_I, and the size of the core lexicon.
pub use frequency::{FrequencyEngine, FrequencyStatistics, RankedLemma};

/// Term Index Builder
/// Extracts single-word terms, bigrams, trigrams and abbreviations.
///
/// Each term is scored with TF-IDF in every document it occurs in, and keeps
/// the best score (max pooling). Domain lexicon terms are boosted and ranked
/// first in the combined `all_terms` list.
///
/// The TF-IDF calculation is pluggable through the `TFIDFEngine` type parameter.
pub use vectorizer::{TermCandidate, TermIndex, TermIndexBuilder, TermIndexSummary};

/// Abbreviation record
/// An abbreviation with every distinct expansion found in the corpus.
pub use vectorizer::abbreviation::AbbreviationRecord;

/// Corpus for TF-IDF
/// This struct manages document frequencies only:
/// - The number of documents
/// - The number of documents in which each term appears
///
/// # Thread Safety
/// This struct is thread-safe and can be updated concurrently from multiple threads.
/// Implemented using DashMap and atomics.
pub use vectorizer::corpus::Corpus;

/// Term Frequency structure
/// Counts term occurrences within a document (or a whole corpus) and keeps
/// first-seen order, so ties always resolve the same way.
pub use vectorizer::term::TermFrequency;

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// A default implementation, `DefaultTFIDFEngine`, is provided and uses
/// `tf = count / total` and `idf = ln(N / df) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// CBOR snapshots of the analysis results
pub use vectorizer::serde::CborSnapshot;

/// Entity Aggregator
/// Normalizes, validates and counts the spans produced by an `EntityTagger`,
/// plus the product names of the lexicon found in each document.
pub use entity::{EntityAggregator, EntityCategory, EntityIndex, EntityRecord};

pub use capability::{EntitySpan, EntityTagger, Morphology, NameKind, PartOfSpeech, SpanCategory};
pub use config::AnalysisConfig;
pub use document::{Document, Language};
pub use error::{AnalysisError, AnalysisResult};
pub use lexicon::{LexiconSet, Lexicons, SubstitutionMap};
pub use preprocess::Preprocessor;
