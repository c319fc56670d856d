use std::sync::LazyLock;

use regex::Regex;

use crate::error::AnalysisResult;

/// Any lowercase Cyrillic or Latin run between word boundaries
static NGRAM_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[а-яёa-z]+\b").expect("valid regex"));

/// Single-word term pattern: a lowercase Cyrillic or Latin run of at least
/// `min_len` chars. A run glued to a digit or a foreign letter has no word
/// boundary on that side and is never matched.
pub fn term_word_regex(min_len: usize) -> AnalysisResult<Regex> {
    let min_len = min_len.max(1);
    Ok(Regex::new(&format!(r"\b[а-яёa-z]{{{min_len},}}\b"))?)
}

/// Words of an already lowercased text
#[inline]
pub fn words<'a>(re: &Regex, lowered: &'a str) -> Vec<&'a str> {
    re.find_iter(lowered).map(|m| m.as_str()).collect()
}

/// Words used to build n-grams
#[inline]
pub fn ngram_words(lowered: &str) -> Vec<&str> {
    words(&NGRAM_WORD_RE, lowered)
}

/// Contiguous `n`-word windows joined by a single space
pub fn ngrams(words: &[&str], n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    words.windows(n).map(|w| w.join(" ")).collect()
}
