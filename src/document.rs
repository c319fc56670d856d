use std::fmt;

use serde::{Deserialize, Serialize};

/// Document language as reported by the (external) ingestion step
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Ru,
    #[default]
    En,
    Other(String),
}

impl Language {
    /// Parse a language code; `"RU"`/`"EN"` in any case, anything else is kept as-is
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "RU" => Language::Ru,
            "EN" => Language::En,
            _ => Language::Other(code.trim().to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Language::Ru => "RU",
            Language::En => "EN",
            Language::Other(code) => code,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One extracted text of the corpus
///
/// `tokens` and `lemmas` are empty until a [`crate::Preprocessor`] has run
/// over the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub raw_text: String,
    pub language: Language,
    pub tokens: Vec<String>,
    pub lemmas: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>, language: Language) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
            language,
            tokens: Vec::new(),
            lemmas: Vec::new(),
        }
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.raw_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("ru"), Language::Ru);
        assert_eq!(Language::from_code(" EN "), Language::En);
        assert_eq!(Language::from_code("de"), Language::Other("de".to_string()));
        assert_eq!(Language::Ru.to_string(), "RU");
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Document::default().language, Language::En);
    }

    #[test]
    fn document_exposes_raw_text() {
        let doc = Document::new("a", "текст", Language::Ru);
        let text: &str = doc.as_ref();
        assert_eq!(text, "текст");
        assert!(doc.lemmas.is_empty());
    }
}
