use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod paginator;
pub mod policy;
pub mod process_queries;
pub mod query;
pub mod server;
pub mod shared;
pub mod tokenizer;

pub use error::{Result, SearchError};
pub use policy::ExecutionPolicy;
pub use server::SearchServer;

pub type DocumentId = i32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub text: String,
    /// Mean of the supplied ratings, truncated toward zero.
    pub rating: i32,
    pub status: DocumentStatus,
}

/// One ranked hit returned by the search routines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

impl ScoredDocument {
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self { Self { id, relevance, rating } }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ document_id = {}, relevance = {}, rating = {} }}", self.id, self.relevance, self.rating)
    }
}
