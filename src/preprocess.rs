use std::sync::{Arc, LazyLock};

use rayon::prelude::*;
use regex::Regex;

use crate::{capability::Morphology, document::Document, error::AnalysisResult, lexicon::Lexicons};

static PUNCTUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Tokenizer and lemmatizer feeding the frequency statistics
#[derive(Debug)]
pub struct Preprocessor<M: Morphology> {
    morphology: M,
    lexicons: Arc<Lexicons>,
    min_word_length: usize,
}

impl<M: Morphology> Preprocessor<M> {
    pub fn new(morphology: M, lexicons: Arc<Lexicons>, min_word_length: usize) -> Self {
        Self {
            morphology,
            lexicons,
            min_word_length,
        }
    }

    /// Lowercased word tokens of at least `min_word_length` chars
    ///
    /// Punctuation becomes a separator, digit runs are deleted in place.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = PUNCTUATION_RE.replace_all(text, " ");
        let text = DIGITS_RE.replace_all(&text, "");
        text.to_lowercase()
            .split_whitespace()
            .filter(|token| token.chars().count() >= self.min_word_length)
            .map(str::to_string)
            .collect()
    }

    /// `(tokens, lemmas)` of one text
    ///
    /// Stopwords are checked on the token and again on its lemma.
    pub fn process_text(&self, text: &str) -> AnalysisResult<(Vec<String>, Vec<String>)> {
        let tokens = self.tokenize(text);
        let stopwords = &self.lexicons.stopwords;
        let mut lemmas = Vec::with_capacity(tokens.len());
        for token in &tokens {
            if stopwords.contains(token) {
                continue;
            }
            let lemma = self.morphology.lemma_normal_form(token)?;
            if !stopwords.contains(&lemma) {
                lemmas.push(lemma);
            }
        }
        Ok((tokens, lemmas))
    }

    /// Fill `tokens` and `lemmas` of every document in parallel
    ///
    /// A document the analyzer fails on keeps its tokens but gets no lemmas.
    pub fn process_documents(&self, documents: &mut [Document]) {
        documents.par_iter_mut().for_each(|doc| match self.process_text(&doc.raw_text) {
            Ok((tokens, lemmas)) => {
                doc.tokens = tokens;
                doc.lemmas = lemmas;
            }
            Err(e) => {
                tracing::warn!(document = %doc.id, "lemmatization failed: {e}");
                doc.tokens = self.tokenize(&doc.raw_text);
                doc.lemmas = Vec::new();
            }
        });
        tracing::debug!(documents = documents.len(), "documents preprocessed");
    }
}
