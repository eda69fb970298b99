use crate::DocumentId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid document id {0}: ids must be non-negative")]
    InvalidId(DocumentId),

    #[error("document id {0} is already indexed")]
    DuplicateId(DocumentId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid query word {0:?}")]
    InvalidQuery(String),

    #[error("document id {0} doesn't exist")]
    UnknownDocument(DocumentId),
}

pub type Result<T> = std::result::Result<T, SearchError>;
