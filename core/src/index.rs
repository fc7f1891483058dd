use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::document::{DocId, DocumentRecord};

/// Frequencies of one word across documents, ordered by id.
pub type Postings = BTreeMap<DocId, f64>;
/// Frequencies of the words of one document, ordered by word.
pub type WordFrequencies = BTreeMap<String, f64>;

static NO_WORDS: WordFrequencies = BTreeMap::new();

/// In-memory inverted index with its transpose.
///
/// `word_to_document_freqs` answers ranking queries; `document_to_word_freqs`
/// lets removal and duplicate detection touch only one document's
/// vocabulary. Both always hold the same (word, document, frequency)
/// triples, and a word with no documents is dropped from the inverted side
/// so every indexed word has a non-zero document frequency.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: HashMap<String, Postings>,
    document_to_word_freqs: HashMap<DocId, WordFrequencies>,
    documents: BTreeMap<DocId, DocumentRecord>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn word_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentRecord> {
        self.documents.get(&id)
    }

    /// Live document ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.documents.keys().copied()
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(word)
    }

    /// Whether `word` occurs in document `id`.
    pub fn contains_word(&self, word: &str, id: DocId) -> bool {
        self.postings(word).is_some_and(|docs| docs.contains_key(&id))
    }

    /// Word frequencies of a document; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies {
        self.document_to_word_freqs.get(&id).unwrap_or(&NO_WORDS)
    }

    /// `ln(N / df)` for an indexed word, `None` if the word is not indexed.
    pub fn inverse_document_freq(&self, word: &str) -> Option<f64> {
        self.postings(word).map(|docs| self.idf_for(docs))
    }

    pub(crate) fn idf_for(&self, docs: &Postings) -> f64 {
        (self.document_count() as f64 / docs.len() as f64).ln()
    }

    /// Index an already validated, stop-word-filtered document. The caller
    /// guarantees `id` is not present.
    pub(crate) fn insert(&mut self, id: DocId, words: &[&str], record: DocumentRecord) {
        let mut freqs = WordFrequencies::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                *freqs.entry((*word).to_string()).or_insert(0.0) += inv_word_count;
            }
        }
        for (word, &tf) in &freqs {
            self.word_to_document_freqs
                .entry(word.clone())
                .or_default()
                .insert(id, tf);
        }
        self.document_to_word_freqs.insert(id, freqs);
        self.documents.insert(id, record);
    }

    pub(crate) fn remove(&mut self, id: DocId) -> Option<DocumentRecord> {
        let record = self.documents.remove(&id)?;
        let words = self.document_to_word_freqs.remove(&id).unwrap_or_default();
        for word in words.keys() {
            if let Some(docs) = self.word_to_document_freqs.get_mut(word) {
                docs.remove(&id);
                if docs.is_empty() {
                    self.word_to_document_freqs.remove(word);
                }
            }
        }
        Some(record)
    }

    /// Like [`remove`](Self::remove), but the posting lists of the document's
    /// words are detached and pruned on the rayon pool.
    pub(crate) fn remove_parallel(&mut self, id: DocId) -> Option<DocumentRecord> {
        let record = self.documents.remove(&id)?;
        let words = self.document_to_word_freqs.remove(&id).unwrap_or_default();
        let mut detached: Vec<(String, Postings)> = words
            .into_keys()
            .filter_map(|word| self.word_to_document_freqs.remove_entry(&word))
            .collect();
        detached.par_iter_mut().for_each(|(_, docs)| {
            docs.remove(&id);
        });
        self.word_to_document_freqs.extend(
            detached
                .into_iter()
                .filter(|(_, docs)| !docs.is_empty()),
        );
        Some(record)
    }
}
