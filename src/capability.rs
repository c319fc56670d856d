//! Capability interfaces for the external morphological analyzer and
//! named-entity tagger.
//!
//! The engines never depend on a concrete model. Any analyzer that can answer
//! these questions per word (or per text, for the tagger) can be plugged in.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{document::Language, error::AnalysisResult};

/// Coarse part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Verb,
    Adverb,
    Other,
}

impl PartOfSpeech {
    /// Only nouns and (full) adjectives can head a term
    #[inline]
    pub fn is_term_head(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Adjective)
    }
}

/// Name grammeme attached to a word by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    GivenName,
    Surname,
    Patronymic,
}

/// Morphological analyzer
pub trait Morphology: Send + Sync {
    fn part_of_speech(&self, word: &str) -> AnalysisResult<PartOfSpeech>;

    fn lemma_normal_form(&self, word: &str) -> AnalysisResult<String>;

    /// Nominative form of `word`
    /// `None` when the word already is nominative or cannot be inflected
    fn inflect_to_nominative(&self, word: &str) -> AnalysisResult<Option<String>>;

    /// Name grammeme of `word`, if any
    fn name_kind(&self, word: &str) -> AnalysisResult<Option<NameKind>>;
}

impl<M: Morphology + ?Sized> Morphology for &M {
    fn part_of_speech(&self, word: &str) -> AnalysisResult<PartOfSpeech> {
        (**self).part_of_speech(word)
    }

    fn lemma_normal_form(&self, word: &str) -> AnalysisResult<String> {
        (**self).lemma_normal_form(word)
    }

    fn inflect_to_nominative(&self, word: &str) -> AnalysisResult<Option<String>> {
        (**self).inflect_to_nominative(word)
    }

    fn name_kind(&self, word: &str) -> AnalysisResult<Option<NameKind>> {
        (**self).name_kind(word)
    }
}

impl<M: Morphology + ?Sized> Morphology for Arc<M> {
    fn part_of_speech(&self, word: &str) -> AnalysisResult<PartOfSpeech> {
        (**self).part_of_speech(word)
    }

    fn lemma_normal_form(&self, word: &str) -> AnalysisResult<String> {
        (**self).lemma_normal_form(word)
    }

    fn inflect_to_nominative(&self, word: &str) -> AnalysisResult<Option<String>> {
        (**self).inflect_to_nominative(word)
    }

    fn name_kind(&self, word: &str) -> AnalysisResult<Option<NameKind>> {
        (**self).name_kind(word)
    }
}

/// Span category produced by a tagger
///
/// Taggers for every language share this vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanCategory {
    Person,
    Organization,
    Location,
    ProductHint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub category: SpanCategory,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, category: SpanCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Named-entity tagger, dispatching on the document language
pub trait EntityTagger: Send + Sync {
    fn tag_spans(&self, text: &str, language: &Language) -> AnalysisResult<Vec<EntitySpan>>;
}

impl<T: EntityTagger + ?Sized> EntityTagger for &T {
    fn tag_spans(&self, text: &str, language: &Language) -> AnalysisResult<Vec<EntitySpan>> {
        (**self).tag_spans(text, language)
    }
}

impl<T: EntityTagger + ?Sized> EntityTagger for Arc<T> {
    fn tag_spans(&self, text: &str, language: &Language) -> AnalysisResult<Vec<EntitySpan>> {
        (**self).tag_spans(text, language)
    }
}
