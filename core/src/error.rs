use thiserror::Error;

use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised for malformed caller input.
///
/// Every variant belongs to the invalid-argument class: the index is left
/// untouched when one is returned. Absence (unknown ids, no matches) is
/// never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("document id {0} is negative")]
    NegativeDocumentId(DocId),
    #[error("document id {0} is already indexed")]
    DuplicateDocumentId(DocId),
    #[error("word {0:?} contains control characters")]
    InvalidWord(String),
    #[error("stop word {0:?} contains control characters")]
    InvalidStopWord(String),
    #[error("query word is empty")]
    EmptyQueryWord,
    #[error("query word {0:?} is invalid")]
    InvalidQueryWord(String),
}

impl SearchError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::NegativeDocumentId(_)
                | Self::DuplicateDocumentId(_)
                | Self::InvalidWord(_)
                | Self::InvalidStopWord(_)
                | Self::EmptyQueryWord
                | Self::InvalidQueryWord(_)
        )
    }
}
