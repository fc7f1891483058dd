use std::collections::VecDeque;

use crate::document::{DocId, DocumentPredicate, DocumentStatus, ScoredDocument};
use crate::error::Result;
use crate::ranking::ExecutionPolicy;
use crate::search_server::SearchServer;

/// Number of most recent requests tracked, one per minute of a day.
pub const REQUEST_WINDOW: usize = 1440;

/// Forwards queries to a server and counts how many of the last
/// [`REQUEST_WINDOW`] requests came back empty.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self {
            server,
            requests: VecDeque::with_capacity(REQUEST_WINDOW),
            no_result_requests: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents(raw_query)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn add_find_request_by<F>(&mut self, raw_query: &str, predicate: F) -> Result<Vec<ScoredDocument>>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.add_find_request_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    pub fn add_find_request_with<P>(
        &mut self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: DocumentPredicate,
    {
        let result = self.server.find_top_documents_with(policy, raw_query, predicate)?;
        self.record(result.is_empty());
        Ok(result)
    }

    /// Requests in the current window that returned no documents.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, empty: bool) {
        if self.requests.len() == REQUEST_WINDOW {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }
        self.requests.push_back(empty);
        if empty {
            self.no_result_requests += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_empty_results_over_trailing_window() {
        let mut server = SearchServer::new("and in at").unwrap();
        server.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        server.add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8]).unwrap();
        server.add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2]).unwrap();
        server.add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1]).unwrap();

        let mut queue = RequestQueue::new(&server);
        for _ in 0..REQUEST_WINDOW - 1 {
            queue.add_find_request("empty request").unwrap();
        }
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW - 1);
        queue.add_find_request("curly dog").unwrap();
        queue.add_find_request("big collar").unwrap();
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.len(), REQUEST_WINDOW);
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW - 3);
    }

    #[test]
    fn failed_requests_are_not_recorded() {
        let server = SearchServer::new("").unwrap();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("cat --dog").is_err());
        assert!(queue.is_empty());
        queue
            .add_find_request_by("cat", |id, _, _| id > 0)
            .unwrap();
        assert_eq!(queue.no_result_requests(), 1);
    }
}
