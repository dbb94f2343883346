use crate::index::{DocumentStore, InvertedIndex};
use crate::query::Query;
use crate::{DocId, Document, DocumentStatus};
use std::collections::BTreeMap;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Filter applied to ranked candidates before truncation.
///
/// Implemented for `DocumentStatus` (exact status match) and for any
/// `Fn(DocId, DocumentStatus, i32) -> bool` taking id, status and average rating.
pub trait DocumentPredicate {
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl DocumentPredicate for DocumentStatus {
    fn matches(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool { status == *self }
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool { self(id, status, rating) }
}

/// Score every candidate, drop minus-term hits and filtered documents, return the top results.
pub fn rank<P>(query: &Query, index: &InvertedIndex, documents: &DocumentStore, predicate: &P) -> Vec<Document>
where
    P: DocumentPredicate + ?Sized,
{
    let total = documents.len() as f64;
    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

    for term in &query.plus_terms {
        if let Some(postings) = index.lookup(term) {
            let idf = (total / postings.len() as f64).ln();
            for (&doc_id, &tf) in postings {
                *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
            }
        }
    }
    for term in &query.minus_terms {
        if let Some(postings) = index.lookup(term) {
            for doc_id in postings.keys() {
                relevance.remove(doc_id);
            }
        }
    }
    let candidates = relevance.len();

    let mut matched: Vec<Document> = relevance
        .into_iter()
        .filter_map(|(doc_id, score)| {
            let data = documents.get(doc_id)?;
            predicate
                .matches(doc_id, data.status, data.average_rating)
                .then(|| Document::new(doc_id, score, data.average_rating))
        })
        .collect();

    top_by_relevance(&mut matched, MAX_RESULT_DOCUMENT_COUNT);

    tracing::debug!(
        plus = query.plus_terms.len(),
        minus = query.minus_terms.len(),
        candidates,
        returned = matched.len(),
        "ranked query"
    );
    matched
}

fn precedes(lhs: &Document, rhs: &Document) -> bool {
    lhs.relevance > rhs.relevance + RELEVANCE_EPSILON
        || ((lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON && lhs.rating > rhs.rating)
}

/// Relevance descending, near-equal relevances by rating descending.
///
/// Epsilon equality is not transitive, so it cannot drive `sort_by` directly. A total
/// sort on raw relevance comes first, each run of near-tied neighbours is then ordered
/// by rating, and a stable insertion pass settles ties that chain across runs.
pub fn sort_by_relevance(docs: &mut [Document]) {
    presort(docs);
    settle_near_ties(docs);
}

/// Sort as `sort_by_relevance` and keep the first `limit` documents.
///
/// Everything after the first relevance gap of at least epsilon at or past `limit` is
/// dropped before the insertion pass; no document behind such a gap can move ahead of it.
pub fn top_by_relevance(docs: &mut Vec<Document>, limit: usize) {
    presort(docs);
    if let Some(cut) = (limit.max(1)..docs.len())
        .find(|&i| docs[i - 1].relevance - docs[i].relevance >= RELEVANCE_EPSILON)
    {
        docs.truncate(cut);
    }
    settle_near_ties(docs);
    docs.truncate(limit);
}

fn presort(docs: &mut [Document]) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    let mut start = 0;
    while start < docs.len() {
        let mut end = start + 1;
        while end < docs.len() && docs[end - 1].relevance - docs[end].relevance < RELEVANCE_EPSILON {
            end += 1;
        }
        docs[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        start = end;
    }
}

fn settle_near_ties(docs: &mut [Document]) {
    for i in 1..docs.len() {
        let mut j = i;
        while j > 0 && precedes(&docs[j], &docs[j - 1]) {
            docs.swap(j, j - 1);
            j -= 1;
        }
    }
}
