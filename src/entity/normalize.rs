use crate::{capability::Morphology, lexicon::SubstitutionMap};

/// Collapse runs of whitespace (including newlines) to single spaces
#[inline]
pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First letter uppercase, the rest lowercase
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Person / organization / location name: collapsed, then replaced by its
/// full form when the whole string is a known abbreviation
pub fn normalize_name(name: &str, abbreviations: &SubstitutionMap) -> String {
    let name = collapse_whitespace(name);
    match abbreviations.get(&name) {
        Some(full) => full.to_string(),
        None => name,
    }
}

/// Location name: the first word of a multi-word name is put into the
/// nominative case before the abbreviation lookup
///
/// A word the analyzer cannot inflect (or fails on) is kept unchanged.
pub fn normalize_location<M>(name: &str, morphology: &M, abbreviations: &SubstitutionMap) -> String
where
    M: Morphology + ?Sized,
{
    let mut words: Vec<String> = name.split_whitespace().map(str::to_string).collect();
    if words.len() > 1 {
        match morphology.inflect_to_nominative(&words[0]) {
            Ok(Some(nominative)) => words[0] = capitalize(&nominative),
            Ok(None) => {}
            Err(e) => tracing::debug!("keeping {:?} uninflected: {e}", words[0]),
        }
    }
    normalize_name(&words.join(" "), abbreviations)
}
