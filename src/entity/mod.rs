pub mod normalize;
pub mod validate;

use std::sync::Arc;

use ahash::RandomState;
use indexmap::IndexMap;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    capability::{EntityTagger, Morphology, SpanCategory},
    config::EntityConfig,
    document::Document,
    error::AnalysisResult,
    lexicon::Lexicons,
    vectorizer::serde::CborSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Person,
    Organization,
    Location,
    Product,
}

impl EntityCategory {
    /// Output order of the categories
    pub const ALL: [EntityCategory; 4] = [
        EntityCategory::Person,
        EntityCategory::Organization,
        EntityCategory::Location,
        EntityCategory::Product,
    ];
}

impl From<SpanCategory> for EntityCategory {
    fn from(category: SpanCategory) -> Self {
        match category {
            SpanCategory::Person => EntityCategory::Person,
            SpanCategory::Organization => EntityCategory::Organization,
            SpanCategory::Location => EntityCategory::Location,
            SpanCategory::ProductHint => EntityCategory::Product,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub name: String,
    pub category: EntityCategory,
    /// occurrences over the whole corpus
    pub frequency: u64,
}

/// Surviving entities per category, most frequent first
///
/// Every category is present, in [`EntityCategory::ALL`] order, even when its
/// list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityIndex {
    pub by_category: IndexMap<EntityCategory, Vec<EntityRecord>, RandomState>,
    pub total: usize,
}

impl Default for EntityIndex {
    fn default() -> Self {
        Self {
            by_category: EntityCategory::ALL.iter().map(|&c| (c, Vec::new())).collect(),
            total: 0,
        }
    }
}

impl EntityIndex {
    pub fn get(&self, category: EntityCategory) -> &[EntityRecord] {
        self.by_category.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record count per category
    pub fn category_counts(&self) -> Vec<(EntityCategory, usize)> {
        self.by_category.iter().map(|(&c, records)| (c, records.len())).collect()
    }
}

impl CborSnapshot for EntityIndex {}

/// Occurrence counts in first-seen order
type Tally = IndexMap<String, u64, RandomState>;

/// Collects named entities over a corpus
///
/// The tagger proposes spans, which are normalized and validated one by one.
/// Product names from the lexicon are additionally searched for in every
/// document. Occurrences are counted per category and filtered by the
/// configured minimum frequency.
#[derive(Debug)]
pub struct EntityAggregator<M, T>
where
    M: Morphology,
    T: EntityTagger,
{
    morphology: M,
    tagger: T,
    lexicons: Arc<Lexicons>,
    config: EntityConfig,
    product_patterns: Vec<(String, Regex)>,
}

impl<M, T> EntityAggregator<M, T>
where
    M: Morphology,
    T: EntityTagger,
{
    pub fn new(morphology: M, tagger: T, lexicons: Arc<Lexicons>, config: EntityConfig) -> AnalysisResult<Self> {
        let product_patterns = lexicons
            .products
            .iter()
            .map(|product| {
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(product)))?;
                Ok((product.to_string(), re))
            })
            .collect::<AnalysisResult<Vec<_>>>()?;
        Ok(Self {
            morphology,
            tagger,
            lexicons,
            config,
            product_patterns,
        })
    }

    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Tag, normalize and count the entities of every document
    ///
    /// Documents are processed in parallel; counts are merged in document
    /// order so ties keep their first-seen order. A document that cannot be
    /// tagged (or whose person check fails) contributes nothing.
    pub fn aggregate(&self, documents: &[Document]) -> EntityIndex {
        let per_document: Vec<Vec<(EntityCategory, String)>> = documents
            .par_iter()
            .map(|doc| match self.extract_document(doc) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(document = %doc.id, "skipping document in entity extraction: {e}");
                    Vec::new()
                }
            })
            .collect();

        let mut tallies: IndexMap<EntityCategory, Tally, RandomState> =
            EntityCategory::ALL.iter().map(|&c| (c, Tally::default())).collect();
        for (category, name) in per_document.into_iter().flatten() {
            if let Some(tally) = tallies.get_mut(&category) {
                *tally.entry(name).or_insert(0) += 1;
            }
        }

        let mut total = 0;
        let by_category = tallies
            .into_iter()
            .map(|(category, tally)| {
                let threshold = self.threshold(category);
                let mut records: Vec<EntityRecord> = tally
                    .into_iter()
                    .filter(|&(_, frequency)| frequency >= threshold)
                    .map(|(name, frequency)| EntityRecord {
                        name,
                        category,
                        frequency,
                    })
                    .collect();
                records.sort_by(|a, b| b.frequency.cmp(&a.frequency));
                total += records.len();
                (category, records)
            })
            .collect();

        let index = EntityIndex { by_category, total };
        tracing::info!(
            documents = documents.len(),
            total = index.total,
            persons = index.get(EntityCategory::Person).len(),
            organizations = index.get(EntityCategory::Organization).len(),
            locations = index.get(EntityCategory::Location).len(),
            products = index.get(EntityCategory::Product).len(),
            "entity index built"
        );
        index
    }

    /// Every accepted occurrence of one document, in text order, followed by
    /// the product lexicon hits
    pub fn extract_document(&self, doc: &Document) -> AnalysisResult<Vec<(EntityCategory, String)>> {
        let spans = self.tagger.tag_spans(&doc.raw_text, &doc.language)?;
        let abbreviations = &self.lexicons.location_abbreviations;

        let mut found = Vec::with_capacity(spans.len());
        for span in spans {
            let accepted = match span.category {
                SpanCategory::Person => {
                    let name = normalize::normalize_name(&span.text, abbreviations);
                    validate::is_valid_person(&name, &self.morphology)?.then_some(name)
                }
                SpanCategory::Organization => {
                    let name = normalize::normalize_name(&span.text, abbreviations);
                    validate::is_valid_organization(&name, &self.lexicons.journal_markers).then_some(name)
                }
                SpanCategory::Location => {
                    let name = normalize::normalize_location(&span.text, &self.morphology, abbreviations);
                    validate::is_valid_location(&name, &self.lexicons.address_markers).then_some(name)
                }
                SpanCategory::ProductHint => Some(normalize::collapse_whitespace(&span.text)),
            };
            if let Some(name) = accepted {
                found.push((span.category.into(), name));
            }
        }

        for (product, re) in &self.product_patterns {
            if re.is_match(&doc.raw_text) {
                found.push((EntityCategory::Product, product.clone()));
            }
        }
        Ok(found)
    }

    #[inline]
    fn threshold(&self, category: EntityCategory) -> u64 {
        match category {
            EntityCategory::Person => self.config.min_person_frequency,
            _ => self.config.min_entity_frequency,
        }
    }
}
