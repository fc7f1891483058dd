use serde::{Deserialize, Serialize};
use std::fmt;

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

/// Per-document metadata stored alongside the postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub rating: i32,
    pub status: DocumentStatus,
    pub text: String,
}

/// One ranked hit returned by the search server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl ScoredDocument {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Self { id, relevance, rating }
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Truncating integer mean of the ratings, 0 when there are none.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

/// Caller-supplied inclusion filter consulted for every candidate document.
///
/// Implemented for any `Fn(DocId, DocumentStatus, i32) -> bool` closure, so
/// most callers never name this trait. `Sync` is required because the
/// parallel ranking path calls the predicate from worker threads.
pub trait DocumentPredicate: Sync {
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
{
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

/// Keeps documents with exactly the given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithStatus(pub DocumentStatus);

impl DocumentPredicate for WithStatus {
    fn matches(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        status == self.0
    }
}
