use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid document id {id}: {reason}")]
    InvalidDocumentId { id: DocId, reason: &'static str },

    #[error("word contains control characters: {word:?}")]
    InvalidCharacter { word: String },

    #[error("invalid query word {word:?}: {reason}")]
    InvalidQuery { word: String, reason: &'static str },

    #[error("document index {index} out of range (document count {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
