use crate::error::{Result, SearchError};
use crate::index::{average_rating, DocumentStore, InvertedIndex};
use crate::query::Query;
use crate::ranking::{rank, DocumentPredicate};
use crate::tokenizer::StopWords;
use crate::{DocId, Document, DocumentData, DocumentStatus};
use std::str::FromStr;

/// Append-only search index over short text documents.
///
/// Documents are added once under a caller-chosen id and are never updated or
/// removed. All operations are synchronous; the server is not meant to be mutated
/// from several threads without outside locking.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    pub fn new() -> Self { Self::default() }

    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_stop_words(StopWords::new(words)?))
    }

    pub fn from_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Validate and index one document.
    ///
    /// Nothing is modified unless every check passes.
    pub fn add_document(&mut self, doc_id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if doc_id < 0 {
            tracing::debug!(document_id = doc_id, "rejected negative document id");
            return Err(SearchError::InvalidDocumentId { id: doc_id, reason: "negative" });
        }
        if self.documents.contains(doc_id) {
            tracing::debug!(document_id = doc_id, "rejected duplicate document id");
            return Err(SearchError::InvalidDocumentId { id: doc_id, reason: "duplicate" });
        }
        let words = self.stop_words.split_no_stop(text)?;

        self.index.add(doc_id, &words);
        let data = DocumentData { status, average_rating: average_rating(ratings) };
        self.documents.insert(doc_id, data);
        tracing::debug!(document_id = doc_id, words = words.len(), ?status, "indexed document");
        Ok(())
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, status)
    }

    /// Top documents accepted by `predicate`, which receives id, status and average rating.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let query = self.parse_query(raw_query)?;
        Ok(rank(&query, &self.index, &self.documents, &predicate))
    }

    /// Plus terms of `raw_query` found in the document, sorted, with the document's status.
    ///
    /// The term list is empty when the document contains any minus term.
    pub fn match_document(&self, raw_query: &str, doc_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let data = self
            .documents
            .get(doc_id)
            .ok_or(SearchError::InvalidDocumentId { id: doc_id, reason: "unknown" })?;

        if query.minus_terms.iter().any(|term| self.index.contains(term, doc_id)) {
            return Ok((Vec::new(), data.status));
        }
        let matched = query
            .plus_terms
            .into_iter()
            .filter(|term| self.index.contains(term, doc_id))
            .collect();
        Ok((matched, data.status))
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Id of the `index`-th document added.
    pub fn document_id_at(&self, index: usize) -> Result<DocId> {
        self.documents
            .id_at(index)
            .ok_or(SearchError::IndexOutOfRange { index, len: self.documents.len() })
    }

    /// Document ids in the order they were added.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.documents.ids() }

    fn parse_query(&self, raw_query: &str) -> Result<Query> { Query::parse(raw_query, &self.stop_words) }
}

impl FromStr for SearchServer {
    type Err = SearchError;

    /// Build a server whose stop words are the space-separated words of `s`.
    fn from_str(s: &str) -> Result<Self> { Ok(Self::from_stop_words(s.parse()?)) }
}
