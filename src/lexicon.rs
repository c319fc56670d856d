use std::{io, path::Path};

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{config::LexiconPaths, error::{AnalysisError, AnalysisResult}};

/// Ordered, immutable word list loaded from a line-based lexicon file
///
/// File order is kept so that scans over the list (product matching) are
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconSet {
    entries: IndexSet<String, RandomState>,
}

impl LexiconSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse lexicon text: one entry per line, blank lines and `#` comments skipped
    pub fn parse(src: &str) -> Self {
        src.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    #[inline]
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LexiconSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// `key=value` substitution map (location abbreviations)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubstitutionMap {
    entries: IndexMap<String, String, RandomState>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split every non-comment line at its first `=`; lines without `=` are ignored
    pub fn parse(src: &str) -> Self {
        src.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()))
            .collect()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubstitutionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Every lexicon the engines read, loaded once and shared read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicons {
    pub domain_terms: LexiconSet,
    pub abbreviation_stopwords: LexiconSet,
    pub location_abbreviations: SubstitutionMap,
    pub journal_markers: LexiconSet,
    pub address_markers: LexiconSet,
    pub products: LexiconSet,
    pub stopwords: LexiconSet,
}

impl Lexicons {
    /// Load all lexicon files; a missing file yields an empty lexicon
    pub fn load(paths: &LexiconPaths) -> AnalysisResult<Self> {
        let lexicons = Self {
            domain_terms: load_set(&paths.resolve(&paths.domain_terms))?,
            abbreviation_stopwords: load_set(&paths.resolve(&paths.abbreviation_stopwords))?,
            location_abbreviations: load_map(&paths.resolve(&paths.location_abbreviations))?,
            journal_markers: load_set(&paths.resolve(&paths.journal_markers))?,
            address_markers: load_set(&paths.resolve(&paths.address_markers))?,
            products: load_set(&paths.resolve(&paths.products))?,
            stopwords: load_set(&paths.resolve(&paths.stopwords))?,
        };
        tracing::info!(
            domain_terms = lexicons.domain_terms.len(),
            abbreviation_stopwords = lexicons.abbreviation_stopwords.len(),
            location_abbreviations = lexicons.location_abbreviations.len(),
            products = lexicons.products.len(),
            stopwords = lexicons.stopwords.len(),
            "lexicons loaded"
        );
        Ok(lexicons)
    }
}

/// Load a line-based lexicon file
pub fn load_set(path: &Path) -> AnalysisResult<LexiconSet> {
    Ok(read_lexicon(path)?.map(|src| LexiconSet::parse(&src)).unwrap_or_default())
}

/// Load a `key=value` lexicon file
pub fn load_map(path: &Path) -> AnalysisResult<SubstitutionMap> {
    Ok(read_lexicon(path)?.map(|src| SubstitutionMap::parse(&src)).unwrap_or_default())
}

fn read_lexicon(path: &Path) -> AnalysisResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(src) => Ok(Some(src)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("lexicon {} not found, using an empty one", path.display());
            Ok(None)
        }
        Err(source) => Err(AnalysisError::Lexicon {
            path: path.to_path_buf(),
            source,
        }),
    }
}
