use crate::{DocId, DocumentData};
use std::collections::{BTreeMap, HashMap};

/// Term frequency of one term in each document that contains it.
pub type Postings = BTreeMap<DocId, f64>;

#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index one document's stop-word-filtered words.
    ///
    /// Each occurrence adds `1 / words.len()`, so a document's frequencies sum to 1.
    pub fn add(&mut self, doc_id: DocId, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        let share = 1.0 / words.len() as f64;
        for word in words {
            *self
                .postings
                .entry((*word).to_string())
                .or_default()
                .entry(doc_id)
                .or_insert(0.0) += share;
        }
    }

    pub fn lookup(&self, term: &str) -> Option<&Postings> { self.postings.get(term) }

    /// Number of documents containing `term`, zero if unseen.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, |p| p.len())
    }

    pub fn term_frequency(&self, term: &str, doc_id: DocId) -> Option<f64> {
        self.postings.get(term)?.get(&doc_id).copied()
    }

    pub fn contains(&self, term: &str, doc_id: DocId) -> bool {
        self.term_frequency(term, doc_id).is_some()
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }
}

/// Metadata for every accepted document, plus the order they were added in.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<DocId, DocumentData>,
    order: Vec<DocId>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Callers check `contains` first; ids are never overwritten.
    pub fn insert(&mut self, doc_id: DocId, data: DocumentData) {
        debug_assert!(!self.documents.contains_key(&doc_id));
        self.documents.insert(doc_id, data);
        self.order.push(doc_id);
    }

    pub fn get(&self, doc_id: DocId) -> Option<&DocumentData> { self.documents.get(&doc_id) }

    pub fn contains(&self, doc_id: DocId) -> bool { self.documents.contains_key(&doc_id) }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn id_at(&self, index: usize) -> Option<DocId> { self.order.get(index).copied() }

    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ { self.order.iter().copied() }
}

/// Truncating integer mean of `ratings`, or 0 when there are none.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStatus;

    #[test]
    fn term_frequencies_sum_to_one() {
        let mut index = InvertedIndex::new();
        index.add(1, &["fluffy", "cat", "fluffy", "tail"]);
        let total: f64 = ["fluffy", "cat", "tail"]
            .iter()
            .filter_map(|t| index.term_frequency(t, 1))
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(index.term_frequency("fluffy", 1), Some(0.5));
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let mut index = InvertedIndex::new();
        index.add(1, &["cat", "cat"]);
        index.add(2, &["cat", "dog"]);
        assert_eq!(index.document_frequency("cat"), 2);
        assert_eq!(index.document_frequency("dog"), 1);
        assert_eq!(index.document_frequency("bird"), 0);
        assert!(index.lookup("bird").is_none());
    }

    #[test]
    fn empty_document_adds_no_terms() {
        let mut index = InvertedIndex::new();
        index.add(3, &[]);
        assert_eq!(index.num_terms(), 0);
    }

    #[test]
    fn store_keeps_insertion_order() {
        let mut store = DocumentStore::new();
        let data = DocumentData { status: DocumentStatus::Actual, average_rating: 0 };
        store.insert(10, data);
        store.insert(3, data);
        assert_eq!(store.id_at(0), Some(10));
        assert_eq!(store.id_at(1), Some(3));
        assert_eq!(store.id_at(2), None);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![10, 3]);
    }

    #[test]
    fn average_rating_truncates() {
        assert_eq!(average_rating(&[1, 2, 3]), 2);
        assert_eq!(average_rating(&[8, -3]), 2);
        assert_eq!(average_rating(&[5, -12, 2, 1]), -1);
        assert_eq!(average_rating(&[7, 2, 7]), 5);
        assert_eq!(average_rating(&[]), 0);
    }
}
