//! TF-IDF ranking over the inverted index.
//!
//! Relevance of a document is the sum over inclusion terms of
//! `tf(term, doc) * ln(N / df(term))`, counted only for documents accepted by
//! the predicate. Any document containing an exclusion term is dropped
//! afterwards, whatever the predicate said. Results are ordered by relevance,
//! then rating, then id, and cut to [`MAX_RESULT_DOCUMENT_COUNT`].

use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::concurrent_map::ConcurrentMap;
use crate::document::{DocId, DocumentPredicate, ScoredDocument};
use crate::index::InvertedIndex;
use crate::query::Query;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
pub const DEFAULT_SHARD_COUNT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

/// Every matching document with its relevance, in ascending id order.
pub fn find_all_documents<P>(index: &InvertedIndex, query: &Query<'_>, predicate: &P) -> Vec<ScoredDocument>
where
    P: DocumentPredicate + ?Sized,
{
    let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for word in &query.inclusion {
        let Some(docs) = index.postings(word) else {
            continue;
        };
        let idf = index.idf_for(docs);
        for (&id, &tf) in docs {
            let Some(doc) = index.document(id) else {
                continue;
            };
            if predicate.matches(id, doc.status, doc.rating) {
                *document_to_relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }
    }

    for word in &query.exclusion {
        let Some(docs) = index.postings(word) else {
            continue;
        };
        for id in docs.keys() {
            document_to_relevance.remove(id);
        }
    }

    document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            index
                .document(id)
                .map(|doc| ScoredDocument::new(id, relevance, doc.rating))
        })
        .collect()
}

/// Parallel counterpart of [`find_all_documents`]: one rayon task per
/// inclusion term writes into a sharded accumulator, then exclusion terms
/// erase their documents. Returns documents in unspecified order.
pub fn find_all_documents_parallel<P>(
    index: &InvertedIndex,
    query: &Query<'_>,
    predicate: &P,
    shard_count: usize,
) -> Vec<ScoredDocument>
where
    P: DocumentPredicate + ?Sized,
{
    let document_to_relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(shard_count);

    query.inclusion.par_iter().for_each(|word| {
        let Some(docs) = index.postings(word) else {
            return;
        };
        let idf = index.idf_for(docs);
        for (&id, &tf) in docs {
            let Some(doc) = index.document(id) else {
                continue;
            };
            if predicate.matches(id, doc.status, doc.rating) {
                document_to_relevance.accumulate(id, tf * idf);
            }
        }
    });

    query.exclusion.par_iter().for_each(|word| {
        if let Some(docs) = index.postings(word) {
            for id in docs.keys() {
                document_to_relevance.erase(id);
            }
        }
    });

    document_to_relevance
        .snapshot()
        .into_iter()
        .filter_map(|(id, relevance)| {
            index
                .document(id)
                .map(|doc| ScoredDocument::new(id, relevance, doc.rating))
        })
        .collect()
}

/// Order hits and keep the best [`MAX_RESULT_DOCUMENT_COUNT`].
///
/// Hits are first sorted by relevance (descending, ties by id). Each run of
/// hits whose relevance lies within [`RELEVANCE_EPSILON`] of the run's first
/// hit is then reordered by rating (descending) and id (ascending).
pub fn rank(mut docs: Vec<ScoredDocument>, policy: ExecutionPolicy) -> Vec<ScoredDocument> {
    let by_relevance = |a: &ScoredDocument, b: &ScoredDocument| {
        b.relevance.total_cmp(&a.relevance).then(a.id.cmp(&b.id))
    };
    match policy {
        ExecutionPolicy::Sequential => docs.sort_by(by_relevance),
        ExecutionPolicy::Parallel => docs.par_sort_unstable_by(by_relevance),
    }

    let mut start = 0;
    while start < docs.len() {
        let head = docs[start].relevance;
        let end = docs[start..]
            .iter()
            .position(|doc| head - doc.relevance >= RELEVANCE_EPSILON)
            .map_or(docs.len(), |offset| start + offset);
        docs[start..end].sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        start = end;
        if start >= MAX_RESULT_DOCUMENT_COUNT {
            break;
        }
    }

    docs.truncate(MAX_RESULT_DOCUMENT_COUNT);
    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: DocId, relevance: f64, rating: i32) -> ScoredDocument {
        ScoredDocument::new(id, relevance, rating)
    }

    #[test]
    fn orders_by_relevance_then_rating_then_id() {
        let docs = vec![
            hit(1, 0.1, 9),
            hit(2, 0.5, 1),
            hit(3, 0.5 + 1e-9, 3),
            hit(4, 0.5, 3),
            hit(5, 0.3, 0),
        ];
        let ids: Vec<DocId> = rank(docs, ExecutionPolicy::Sequential).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 4, 2, 5, 1]);
    }

    #[test]
    fn truncates_to_result_limit() {
        let docs: Vec<_> = (0..20).map(|i| hit(i, f64::from(i), 0)).collect();
        let ranked = rank(docs, ExecutionPolicy::Parallel);
        assert_eq!(ranked.len(), MAX_RESULT_DOCUMENT_COUNT);
        assert_eq!(ranked[0].id, 19);
        assert_eq!(ranked[4].id, 15);
    }

    #[test]
    fn policies_agree_on_order() {
        let docs: Vec<_> = (0..50).map(|i| hit(i, f64::from(i % 7) * 0.1, i % 3)).collect();
        assert_eq!(
            rank(docs.clone(), ExecutionPolicy::Sequential),
            rank(docs, ExecutionPolicy::Parallel)
        );
    }
}
