use rayon::prelude::*;
use tracing::debug;

use crate::document::{
    compute_average_rating, DocId, DocumentPredicate, DocumentRecord, DocumentStatus, ScoredDocument, WithStatus,
};
use crate::error::{Result, SearchError};
use crate::index::{InvertedIndex, WordFrequencies};
use crate::query::Query;
use crate::ranking::{self, ExecutionPolicy, DEFAULT_SHARD_COUNT};
use crate::tokenizer::StopWords;

/// Words of a query found in one document, with that document's status.
pub type DocumentMatch = (Vec<String>, DocumentStatus);

/// In-memory full-text search server.
///
/// Mutations (`add_document`, `remove_document`, `remove_duplicates`) take
/// `&mut self` and queries take `&self`, so any number of queries may run
/// together while a mutation always has the index to itself. Share one
/// server across threads through [`SharedSearchServer`](crate::SharedSearchServer).
#[derive(Debug)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    shard_count: usize,
}

impl SearchServer {
    /// Build a server from space-delimited stop words, e.g. `"and with"`.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Ok(Self::from_stop_words(StopWords::parse(stop_words_text)?))
    }

    /// Build a server from any sequence of stop words.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_stop_words(StopWords::from_words(stop_words)?))
    }

    pub fn from_stop_words(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            index: InvertedIndex::new(),
            shard_count: DEFAULT_SHARD_COUNT,
        }
    }

    /// Number of shards used by the parallel ranking accumulator.
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count.max(1);
        self
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.ids()
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentRecord> {
        self.index.document(id)
    }

    /// Index a document. The id must be non-negative and unused, and every
    /// word must be free of control characters; on failure nothing changes.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(SearchError::NegativeDocumentId(id));
        }
        if self.index.contains(id) {
            return Err(SearchError::DuplicateDocumentId(id));
        }
        let words = self.stop_words.split_no_stop(text)?;
        let record = DocumentRecord {
            rating: compute_average_rating(ratings),
            status,
            text: text.to_string(),
        };
        debug!(document_id = id, words = words.len(), ?status, "indexing document");
        self.index.insert(id, &words, record);
        Ok(())
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, WithStatus(status))
    }

    pub fn find_top_documents_by<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<ScoredDocument>>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Rank documents for `raw_query` among those accepted by `predicate`.
    /// Both policies return the same documents with the same relevance.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: DocumentPredicate,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let matched = match policy {
            ExecutionPolicy::Sequential => ranking::find_all_documents(&self.index, &query, &predicate),
            ExecutionPolicy::Parallel => {
                ranking::find_all_documents_parallel(&self.index, &query, &predicate, self.shard_count)
            }
        };
        Ok(ranking::rank(matched, policy))
    }

    /// Remove a document; returns false if it was not indexed.
    pub fn remove_document(&mut self, id: DocId) -> bool {
        self.remove_document_with(ExecutionPolicy::Sequential, id)
    }

    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocId) -> bool {
        let removed = match policy {
            ExecutionPolicy::Sequential => self.index.remove(id),
            ExecutionPolicy::Parallel => self.index.remove_parallel(id),
        };
        if removed.is_some() {
            debug!(document_id = id, ?policy, "removed document");
        }
        removed.is_some()
    }

    /// Remove every document whose distinct-word set equals that of a
    /// lower id. Returns the removed ids in ascending order.
    pub fn remove_duplicates(&mut self) -> Vec<DocId> {
        crate::duplicates::remove_duplicates(self)
    }

    /// Word frequencies of a document; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies {
        self.index.word_frequencies(id)
    }

    /// Inclusion words of `raw_query` present in document `id`, sorted. The
    /// list is empty if the document contains any exclusion word. Returns
    /// `None` for an unknown id.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<Option<DocumentMatch>> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<Option<DocumentMatch>> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let Some(status) = self.index.document(id).map(|doc| doc.status) else {
            return Ok(None);
        };
        let index = &self.index;
        let words = match policy {
            ExecutionPolicy::Sequential => {
                if query.exclusion.iter().any(|word| index.contains_word(word, id)) {
                    Vec::new()
                } else {
                    query
                        .inclusion
                        .iter()
                        .filter(|word| index.contains_word(word, id))
                        .map(|word| (*word).to_string())
                        .collect()
                }
            }
            ExecutionPolicy::Parallel => {
                if query.exclusion.par_iter().any(|word| index.contains_word(word, id)) {
                    Vec::new()
                } else {
                    let mut words: Vec<String> = query
                        .inclusion
                        .par_iter()
                        .filter(|word| index.contains_word(word, id))
                        .map(|word| (*word).to_string())
                        .collect();
                    words.par_sort_unstable();
                    words.dedup();
                    words
                }
            }
        };
        Ok(Some((words, status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        server.add_document(1, "white cat and yellow hat", DocumentStatus::Actual, &[1, 2]).unwrap();
        server.add_document(2, "curly cat curly tail", DocumentStatus::Actual, &[1, 2]).unwrap();
        server.add_document(3, "nasty dog with big eyes", DocumentStatus::Banned, &[5]).unwrap();
        server
    }

    #[test]
    fn rejects_negative_and_duplicate_ids() {
        let mut server = server();
        assert_eq!(
            server.add_document(-1, "cat", DocumentStatus::Actual, &[]),
            Err(SearchError::NegativeDocumentId(-1))
        );
        assert_eq!(
            server.add_document(2, "dog", DocumentStatus::Actual, &[]),
            Err(SearchError::DuplicateDocumentId(2))
        );
        assert_eq!(server.document_count(), 3);
    }

    #[test]
    fn invalid_word_leaves_index_untouched() {
        let mut server = server();
        let err = server
            .add_document(9, "fresh word bro\x07ken", DocumentStatus::Actual, &[])
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!server.index().contains(9));
        assert!(server.index().postings("fresh").is_none());
    }

    #[test]
    fn records_average_rating_and_status() {
        let server = server();
        let doc = server.document(3).unwrap();
        assert_eq!(doc.rating, 5);
        assert_eq!(doc.status, DocumentStatus::Banned);
        assert_eq!(doc.text, "nasty dog with big eyes");
    }

    #[test]
    fn status_filter_selects_banned() {
        let server = server();
        let hits = server.find_top_documents_by_status("nasty cat", DocumentStatus::Banned).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn stop_word_only_document_is_indexed_without_words() {
        let mut server = server();
        server.add_document(10, "and with", DocumentStatus::Actual, &[]).unwrap();
        assert!(server.word_frequencies(10).is_empty());
        assert_eq!(server.match_document("and cat", 10).unwrap(), Some((vec![], DocumentStatus::Actual)));
    }

    #[test]
    fn match_document_unknown_id_is_none() {
        let server = server();
        assert_eq!(server.match_document("cat", 77).unwrap(), None);
        assert!(server.match_document("--cat", 77).is_err());
    }
}
