use crate::error::Result;
use crate::ranking::DocumentPredicate;
use crate::server::SearchServer;
use crate::{Document, DocumentStatus};
use std::collections::VecDeque;

/// Default window: one day of requests at one request per minute.
pub const MIN_IN_DAY: usize = 1440;

/// Sliding window over the most recent find requests, counting those that found nothing.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    capacity: usize,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self { Self::with_capacity(server, MIN_IN_DAY) }

    /// A window of `capacity` requests; zero is treated as one.
    pub fn with_capacity(server: &'a SearchServer, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { server, requests: VecDeque::with_capacity(capacity), capacity, no_result_requests: 0 }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, DocumentStatus::Actual)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, status)
    }

    /// Run the query and record whether it came back empty. Failed queries are not recorded.
    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let found = self.server.find_top_documents_with(raw_query, predicate)?;
        self.record(found.is_empty());
        Ok(found)
    }

    /// Zero-result requests among the most recent `capacity` requests.
    pub fn no_result_request_count(&self) -> usize { self.no_result_requests }

    pub fn len(&self) -> usize { self.requests.len() }

    pub fn is_empty(&self) -> bool { self.requests.is_empty() }

    pub fn capacity(&self) -> usize { self.capacity }

    fn record(&mut self, empty: bool) {
        if self.requests.len() == self.capacity {
            if let Some(evicted) = self.requests.pop_front() {
                tracing::trace!(evicted_empty = evicted, "request window full, evicting oldest");
                if evicted {
                    self.no_result_requests -= 1;
                }
            }
        }
        self.requests.push_back(empty);
        if empty {
            self.no_result_requests += 1;
        }
    }
}
