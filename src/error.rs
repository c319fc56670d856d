use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building an index
///
/// Only the loaders and the serialization helpers return these to the caller.
/// Inside a corpus build, a failing document is logged and skipped.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("morphology failed for {word:?}: {message}")]
    Morphology { word: String, message: String },

    #[error("entity tagging failed: {0}")]
    Tagging(String),

    #[error("cannot read lexicon {path}: {source}")]
    Lexicon {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_cbor::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
