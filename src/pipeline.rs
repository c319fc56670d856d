use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    capability::{EntityTagger, Morphology},
    config::AnalysisConfig,
    document::Document,
    entity::{EntityAggregator, EntityIndex},
    error::AnalysisResult,
    frequency::{FrequencyEngine, FrequencyStatistics},
    lexicon::Lexicons,
    preprocess::Preprocessor,
    vectorizer::{serde::CborSnapshot, TermIndex, TermIndexBuilder},
};

/// Results of all three engines over one corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    pub frequency: FrequencyStatistics,
    pub terms: TermIndex,
    pub entities: EntityIndex,
}

impl CborSnapshot for CorpusReport {}

/// Runs preprocessing and every engine over a document collection
///
/// The morphological analyzer is shared by the preprocessor, the term
/// builder and the entity aggregator.
#[derive(Debug)]
pub struct CorpusAnalyzer<M, T>
where
    M: Morphology,
    T: EntityTagger,
{
    preprocessor: Preprocessor<Arc<M>>,
    frequency: FrequencyEngine,
    terms: TermIndexBuilder<Arc<M>>,
    entities: EntityAggregator<Arc<M>, T>,
}

impl<M, T> CorpusAnalyzer<M, T>
where
    M: Morphology,
    T: EntityTagger,
{
    pub fn new(config: &AnalysisConfig, lexicons: Arc<Lexicons>, morphology: Arc<M>, tagger: T) -> AnalysisResult<Self> {
        Ok(Self {
            preprocessor: Preprocessor::new(morphology.clone(), lexicons.clone(), config.terms.min_word_length),
            frequency: FrequencyEngine::new(&config.frequency),
            terms: TermIndexBuilder::new(morphology.clone(), lexicons.clone(), config.terms.clone())?,
            entities: EntityAggregator::new(morphology, tagger, lexicons, config.entities.clone())?,
        })
    }

    /// Load the lexicons named by `config` and build the analyzer
    pub fn from_config(config: &AnalysisConfig, morphology: Arc<M>, tagger: T) -> AnalysisResult<Self> {
        let lexicons = Lexicons::load(&config.lexicons)?;
        Self::new(config, Arc::new(lexicons), morphology, tagger)
    }

    /// Preprocess `documents` in place, then run the engines
    pub fn analyze(&self, documents: &mut [Document]) -> CorpusReport {
        self.preprocessor.process_documents(documents);
        let documents = &*documents;

        let lemma_lists: Vec<&[String]> = documents.iter().map(|doc| doc.lemmas.as_slice()).collect();
        let frequency = self.frequency.analyze(&lemma_lists);
        let (terms, entities) = rayon::join(
            || self.terms.build_index(documents),
            || self.entities.aggregate(documents),
        );

        tracing::info!(
            documents = documents.len(),
            lemmas = frequency.unique_lemmas,
            terms = terms.total,
            entities = entities.total,
            "corpus analyzed"
        );
        CorpusReport {
            frequency,
            terms,
            entities,
        }
    }
}
