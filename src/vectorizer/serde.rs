use serde::{de::DeserializeOwned, Serialize};

use crate::{error::AnalysisResult, vectorizer::TermIndex};

/// Compact binary (CBOR) snapshot of an analysis result
///
/// Used by exporters that want a lossless copy of a result, and to compare
/// two builds byte for byte.
pub trait CborSnapshot: Serialize + DeserializeOwned {
    /// Serialize into CBOR bytes
    fn to_cbor(&self) -> AnalysisResult<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Deserialize from CBOR bytes
    fn from_cbor(bytes: &[u8]) -> AnalysisResult<Self> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}

impl CborSnapshot for TermIndex {}
