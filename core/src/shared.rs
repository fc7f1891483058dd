use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::document::{DocId, DocumentStatus, ScoredDocument};
use crate::error::Result;
use crate::search_server::SearchServer;

/// A [`SearchServer`] shared between threads behind a single-writer,
/// multi-reader lock. Queries hold the read lock for their whole run and
/// mutations hold the write lock, so a query never observes a document
/// half-indexed or half-removed.
#[derive(Debug, Clone)]
pub struct SharedSearchServer {
    inner: Arc<RwLock<SearchServer>>,
}

impl SharedSearchServer {
    pub fn new(server: SearchServer) -> Self {
        Self { inner: Arc::new(RwLock::new(server)) }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, SearchServer> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, SearchServer> {
        self.inner.write()
    }

    pub fn add_document(&self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        self.write().add_document(id, text, status, ratings)
    }

    pub fn remove_document(&self, id: DocId) -> bool {
        self.write().remove_document(id)
    }

    pub fn remove_duplicates(&self) -> Vec<DocId> {
        self.write().remove_duplicates()
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.read().find_top_documents(raw_query)
    }
}
