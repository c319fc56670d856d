use std::sync::LazyLock;

use regex::Regex;

use crate::{capability::Morphology, error::AnalysisResult, lexicon::LexiconSet};

/// `Surname I.I.`, `I.I. Surname`, `Given Surname` (Latin or Cyrillic);
/// anchored at the start only
static PERSON_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^[А-ЯЁA-Z][а-яёa-z]+\s+[А-ЯЁA-Z]\.\s*[А-ЯЁA-Z]\.").expect("valid regex"),
        Regex::new(r"^[А-ЯЁA-Z]\.\s*[А-ЯЁA-Z]\.\s+[А-ЯЁA-Z][а-яёa-z]+").expect("valid regex"),
        Regex::new(r"^[А-ЯЁA-Z][а-яёa-z]+\s+[А-ЯЁA-Z][а-яёa-z]+").expect("valid regex"),
    ]
});

/// Bibliographic fragments the taggers like to mistake for people
const PERSON_NOISE: [&str; 4] = ["parallel distrib", "et al", "proc", "ieee"];

const ORGANIZATION_MARKERS: [&str; 6] = [
    "университет",
    "институт",
    "university",
    "company",
    "institute",
    "corporation",
];

#[inline]
fn char_len(name: &str) -> usize {
    name.chars().count()
}

/// Does the lowercased `name` contain any lexicon entry (compared lowercased)
fn contains_marker(lowered: &str, markers: &LexiconSet) -> bool {
    markers.iter().any(|marker| lowered.contains(marker.to_lowercase().as_str()))
}

/// Person names: pattern match first, then the noise list, then the
/// analyzer's name grammemes on the first word
pub fn is_valid_person<M>(name: &str, morphology: &M) -> AnalysisResult<bool>
where
    M: Morphology + ?Sized,
{
    if char_len(name) < 2 {
        return Ok(false);
    }
    if PERSON_PATTERNS.iter().any(|re| re.is_match(name)) {
        return Ok(true);
    }
    let lowered = name.to_lowercase();
    if PERSON_NOISE.iter().any(|noise| lowered.contains(noise)) {
        return Ok(false);
    }
    match name.split_whitespace().next() {
        Some(first) => Ok(morphology.name_kind(first)?.is_some()),
        None => Ok(false),
    }
}

/// Organizations need a marker keyword and must not look like a journal
pub fn is_valid_organization(name: &str, journal_markers: &LexiconSet) -> bool {
    if char_len(name) < 3 {
        return false;
    }
    let lowered = name.to_lowercase();
    if contains_marker(&lowered, journal_markers) {
        return false;
    }
    ORGANIZATION_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Locations are accepted unless they look like a postal address
pub fn is_valid_location(name: &str, address_markers: &LexiconSet) -> bool {
    if char_len(name) < 3 {
        return false;
    }
    !contains_marker(&name.to_lowercase(), address_markers)
}
