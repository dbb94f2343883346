//! In-memory full-text search with TF-IDF ranking and plus/minus query terms.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod index;
pub mod paginate;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod server;
pub mod tokenizer;

pub use error::{Result, SearchError};
pub use paginate::{paginate, Page, Paginator};
pub use ranking::{DocumentPredicate, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use request_queue::{RequestQueue, MIN_IN_DAY};
pub use server::SearchServer;

/// Caller-assigned document identifier. Negative values are rejected on add.
pub type DocId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Per-document metadata kept alongside the inverted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    pub status: DocumentStatus,
    pub average_rating: i32,
}

/// One ranked search hit. Relevance is only comparable within a single query.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self { Self { id, relevance, rating } }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}
