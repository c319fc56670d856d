use std::sync::LazyLock;

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::LexiconSet;

/// `ABBR (expansion)`
static FORWARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-ZА-ЯЁ]{2,})\s*\(([^)]+)\)").expect("valid regex"));

/// `expansion (ABBR)`; the expansion is everything back to the previous `(`
static REVERSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^(]+)\s*\(([A-ZА-ЯЁ]{2,})\)").expect("valid regex"));

/// Single letter plus digit, e.g. `P1`: a variable name, not an abbreviation
static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]$").expect("valid regex"));

/// An abbreviation with every distinct expansion seen in the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbbreviationRecord {
    pub abbreviation: String,
    /// the only expansion, or all of them joined with `"; "`
    pub expansion: String,
    /// distinct expansions in first-seen order
    pub expansions: Vec<String>,
    /// number of distinct expansions (not of occurrences)
    pub frequency: usize,
}

impl AbbreviationRecord {
    fn new(abbreviation: String, expansions: IndexSet<String, RandomState>) -> Self {
        let expansions: Vec<String> = expansions.into_iter().collect();
        let expansion = match expansions.as_slice() {
            [single] => single.clone(),
            many => many.join("; "),
        };
        Self {
            abbreviation,
            expansion,
            frequency: expansions.len(),
            expansions,
        }
    }
}

#[inline]
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `(abbreviation, expansion)` pairs of one unprocessed text
/// All forward matches come before all reverse matches.
pub fn scan_text(text: &str) -> Vec<(String, String)> {
    let forward = FORWARD_RE.captures_iter(text).map(|caps| {
        (caps[1].to_string(), collapse_whitespace(&caps[2]))
    });
    let reverse = REVERSE_RE.captures_iter(text).map(|caps| {
        (caps[2].to_string(), collapse_whitespace(&caps[1]))
    });
    forward.chain(reverse).collect()
}

/// Resolve abbreviations over the corpus
///
/// Texts are scanned in parallel; expansion sets are merged in text order.
/// Stopword abbreviations and variable-like tokens are dropped. The result is
/// sorted by descending number of distinct expansions (stable).
pub fn extract_abbreviations<T>(texts: &[T], stopwords: &LexiconSet) -> Vec<AbbreviationRecord>
where
    T: AsRef<str> + Sync,
{
    let per_text: Vec<Vec<(String, String)>> = texts
        .par_iter()
        .map(|text| scan_text(text.as_ref()))
        .collect();

    let mut expansions: IndexMap<String, IndexSet<String, RandomState>, RandomState> =
        IndexMap::with_hasher(RandomState::new());
    for (abbreviation, expansion) in per_text.into_iter().flatten() {
        expansions
            .entry(abbreviation)
            .or_insert_with(|| IndexSet::with_hasher(RandomState::new()))
            .insert(expansion);
    }

    let mut records: Vec<AbbreviationRecord> = expansions
        .into_iter()
        .filter(|(abbreviation, _)| !stopwords.contains(abbreviation))
        .filter(|(abbreviation, _)| !VARIABLE_RE.is_match(abbreviation))
        .map(|(abbreviation, set)| AbbreviationRecord::new(abbreviation, set))
        .collect();
    records.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_reverse_patterns() {
        let pairs = scan_text("We use NLP (natural\n language processing). Graph neural network (GNN) models.");
        assert_eq!(
            pairs,
            vec![
                ("NLP".to_string(), "natural language processing".to_string()),
                // the reverse match starts right after the previous `(`
                ("GNN".to_string(), "natural language processing). Graph neural network".to_string()),
            ]
        );
    }

    #[test]
    fn cyrillic_abbreviations() {
        let pairs = scan_text("СУБД (система управления базами данных)");
        assert_eq!(pairs[0], ("СУБД".to_string(), "система управления базами данных".to_string()));
    }

    #[test]
    fn repeated_identical_expansion_counts_once() {
        let texts = [
            "NLP (natural language processing)",
            "NLP (natural language processing)",
        ];
        let records = extract_abbreviations(&texts, &LexiconSet::new());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].abbreviation, "NLP");
        assert_eq!(records[0].frequency, 1);
        assert_eq!(records[0].expansion, "natural language processing");
    }

    #[test]
    fn distinct_expansions_are_joined_and_ranked_first() {
        let texts = [
            "ML (machine learning) and CV (computer vision)",
            "ML (maximum likelihood)",
        ];
        let records = extract_abbreviations(&texts, &LexiconSet::new());
        assert_eq!(records[0].abbreviation, "ML");
        assert_eq!(records[0].frequency, 2);
        assert_eq!(records[0].expansion, "machine learning; maximum likelihood");
        assert_eq!(records[1].abbreviation, "CV");
    }

    #[test]
    fn stopwords_and_variables_are_dropped() {
        let stopwords = LexiconSet::parse("THE\n");
        let texts = ["THE (article) P1 (first point) value (P1) SQL (structured query language)"];
        let records = extract_abbreviations(&texts, &stopwords);
        let names: Vec<&str> = records.iter().map(|r| r.abbreviation.as_str()).collect();
        assert!(!names.contains(&"THE"));
        assert!(!names.contains(&"P1"));
        assert!(names.contains(&"SQL"));
    }

    #[test]
    fn variable_filter_matches_letter_digit() {
        assert!(VARIABLE_RE.is_match("P1"));
        assert!(!VARIABLE_RE.is_match("PP1"));
        assert!(!VARIABLE_RE.is_match("NLP"));
    }

    #[test]
    fn empty_corpus_has_no_abbreviations() {
        let texts: [&str; 0] = [];
        assert!(extract_abbreviations(&texts, &LexiconSet::new()).is_empty());
    }
}
