use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;

/// Tunable constants of the three engines plus the lexicon file locations
///
/// Every section falls back to its defaults, so an empty TOML document is a
/// valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub frequency: FrequencyConfig,
    pub terms: TermConfig,
    pub entities: EntityConfig,
    pub lexicons: LexiconPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrequencyConfig {
    /// share of all tokens the core lexicon has to cover
    pub core_lexicon_threshold: f64,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            core_lexicon_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TermConfig {
    /// shortest word (in chars) kept as a single-word term
    pub min_word_length: usize,
    /// per-document count an n-gram needs before it is scored there
    pub min_ngram_frequency: u64,
    /// score multiplier for entries of the domain lexicon
    pub domain_boost: f64,
    /// length of the diversified `all_terms` list
    pub top_terms_limit: usize,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            min_ngram_frequency: 3,
            domain_boost: 2.0,
            top_terms_limit: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntityConfig {
    pub min_entity_frequency: u64,
    pub min_person_frequency: u64,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            min_entity_frequency: 2,
            min_person_frequency: 1,
        }
    }
}

/// Lexicon file names, resolved against `dir` when it is set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LexiconPaths {
    pub dir: Option<PathBuf>,
    pub domain_terms: PathBuf,
    pub abbreviation_stopwords: PathBuf,
    pub location_abbreviations: PathBuf,
    pub journal_markers: PathBuf,
    pub address_markers: PathBuf,
    pub products: PathBuf,
    pub stopwords: PathBuf,
}

impl Default for LexiconPaths {
    fn default() -> Self {
        Self {
            dir: Some(PathBuf::from("data")),
            domain_terms: PathBuf::from("domain_terms.txt"),
            abbreviation_stopwords: PathBuf::from("abbr_stopwords.txt"),
            location_abbreviations: PathBuf::from("location_abbr.txt"),
            journal_markers: PathBuf::from("journal_markers.txt"),
            address_markers: PathBuf::from("address_markers.txt"),
            products: PathBuf::from("products.txt"),
            stopwords: PathBuf::from("stopwords.txt"),
        }
    }
}

impl LexiconPaths {
    /// All files rooted at `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Resolve a file name against `dir`
    pub fn resolve(&self, file: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.to_path_buf(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(src: &str) -> AnalysisResult<Self> {
        Ok(toml::from_str(src)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.terms.top_terms_limit, 1000);
        assert_eq!(config.terms.min_ngram_frequency, 3);
        assert_eq!(config.entities.min_person_frequency, 1);
        assert_eq!(config.entities.min_entity_frequency, 2);
        assert!((config.frequency.core_lexicon_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            config.lexicons.resolve(&config.lexicons.domain_terms),
            PathBuf::from("data").join("domain_terms.txt")
        );
        assert_eq!(
            config.lexicons.resolve(&config.lexicons.stopwords),
            PathBuf::from("data").join("stopwords.txt")
        );
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [terms]
            domain_boost = 3.5

            [lexicons]
            dir = "data"
            products = "/abs/products.txt"
            "#,
        )
        .unwrap();
        assert!((config.terms.domain_boost - 3.5).abs() < f64::EPSILON);
        assert_eq!(config.terms.min_word_length, 3);
        assert_eq!(
            config.lexicons.resolve(&config.lexicons.domain_terms),
            PathBuf::from("data").join("domain_terms.txt")
        );
        assert_eq!(
            config.lexicons.resolve(&config.lexicons.products),
            PathBuf::from("/abs/products.txt")
        );
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = AnalysisConfig::from_toml_str("[terms]\ndomain_boost = \"x\"").unwrap_err();
        assert!(matches!(err, crate::error::AnalysisError::Config(_)));
    }
}
