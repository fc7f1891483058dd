use std::collections::HashSet;
use tracing::info;

use crate::document::DocId;
use crate::index::InvertedIndex;
use crate::search_server::SearchServer;

/// Ids of documents whose set of distinct words already occurred at a lower
/// id, in ascending order. Frequencies and word order are ignored.
pub fn find_duplicates(index: &InvertedIndex) -> Vec<DocId> {
    let mut seen: HashSet<Vec<&str>> = HashSet::new();
    index
        .ids()
        .filter(|&id| {
            let words: Vec<&str> = index.word_frequencies(id).keys().map(String::as_str).collect();
            !seen.insert(words)
        })
        .collect()
}

/// Remove every duplicate found by [`find_duplicates`], keeping the lowest
/// id of each group.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let duplicates = find_duplicates(server.index());
    for &id in &duplicates {
        info!(document_id = id, "found duplicate document");
        server.remove_document(id);
    }
    duplicates
}
