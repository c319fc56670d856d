use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{config::FrequencyConfig, vectorizer::{serde::CborSnapshot, term::TermFrequency}};

/// One row of the rank-frequency (Zipf) table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLemma {
    pub lemma: String,
    pub frequency: u64,
    /// 1-based
    pub rank: usize,
    /// percent of all tokens
    pub relative_frequency: f64,
    pub cumulative_frequency: u64,
}

/// Corpus-wide lexical statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyStatistics {
    /// text volume M (total tokens)
    #[serde(rename = "M")]
    pub total_tokens: u64,
    /// vocabulary volume N (unique lemmas)
    #[serde(rename = "N")]
    pub unique_lemmas: usize,
    /// lexical diversity K_R = N / M * 100
    #[serde(rename = "K_R")]
    pub diversity: f64,
    /// informativity K_I = M / N
    #[serde(rename = "K_I")]
    pub informativity: f64,
    /// smallest rank whose cumulative frequency covers the threshold share
    pub core_lexicon_size: usize,
    pub ranked_lemmas: Vec<RankedLemma>,
}

impl CborSnapshot for FrequencyStatistics {}

/// Rank statistics over lemmatized documents
#[derive(Debug, Clone)]
pub struct FrequencyEngine {
    core_lexicon_threshold: f64,
}

impl Default for FrequencyEngine {
    fn default() -> Self {
        Self::new(&FrequencyConfig::default())
    }
}

impl FrequencyEngine {
    pub fn new(config: &FrequencyConfig) -> Self {
        Self {
            core_lexicon_threshold: config.core_lexicon_threshold,
        }
    }

    /// Build the statistics from per-document lemma sequences
    ///
    /// Lemmas are expected to be stopword-filtered already. Documents are
    /// counted in parallel and merged in document order, so equal counts rank
    /// by first appearance in the corpus.
    pub fn analyze<L>(&self, lemma_lists: &[L]) -> FrequencyStatistics
    where
        L: AsRef<[String]> + Sync,
    {
        let counts = lemma_lists
            .par_iter()
            .map(|lemmas| TermFrequency::from(lemmas.as_ref()))
            .reduce(TermFrequency::new, |mut acc, freq| {
                acc.add_terms_from_freq(&freq);
                acc
            });

        let total_tokens = counts.term_sum();
        let unique_lemmas = counts.term_num();
        let diversity = if total_tokens > 0 {
            unique_lemmas as f64 / total_tokens as f64 * 100.0
        } else {
            0.0
        };
        let informativity = if unique_lemmas > 0 {
            total_tokens as f64 / unique_lemmas as f64
        } else {
            0.0
        };

        let mut cumulative = 0u64;
        let ranked_lemmas: Vec<RankedLemma> = counts
            .sorted_frequency_vector()
            .into_iter()
            .enumerate()
            .map(|(idx, (lemma, frequency))| {
                cumulative += frequency;
                RankedLemma {
                    lemma,
                    frequency,
                    rank: idx + 1,
                    relative_frequency: frequency as f64 / total_tokens as f64 * 100.0,
                    cumulative_frequency: cumulative,
                }
            })
            .collect();

        let boundary = total_tokens as f64 * self.core_lexicon_threshold;
        let core_lexicon_size = ranked_lemmas
            .iter()
            .find(|r| r.cumulative_frequency as f64 >= boundary)
            .map_or(0, |r| r.rank);

        tracing::info!(
            total_tokens,
            unique_lemmas,
            core_lexicon_size,
            "frequency statistics computed"
        );

        FrequencyStatistics {
            total_tokens,
            unique_lemmas,
            diversity,
            informativity,
            core_lexicon_size,
            ranked_lemmas,
        }
    }
}
