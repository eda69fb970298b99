use crate::error::Result;
use crate::process_queries::process_queries;
use crate::{DocumentId, DocumentStatus, ScoredDocument, SearchServer};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Cloneable handle to a server shared between threads.
/// Searches take the read lock, mutations take the write lock.
#[derive(Clone, Default)]
pub struct SharedSearchServer {
    inner: Arc<RwLock<SearchServer>>,
}

impl SharedSearchServer {
    pub fn new(server: SearchServer) -> Self { Self { inner: Arc::new(RwLock::new(server)) } }

    pub fn read(&self) -> RwLockReadGuard<'_, SearchServer> { self.inner.read() }

    pub fn write(&self) -> RwLockWriteGuard<'_, SearchServer> { self.inner.write() }

    pub fn add_document(&self, document_id: DocumentId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        self.inner.write().add_document(document_id, text, status, ratings)
    }

    pub fn remove_document(&self, document_id: DocumentId) { self.inner.write().remove_document(document_id) }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> { self.inner.read().find_top_documents(raw_query) }

    pub fn process_queries<S>(&self, queries: &[S]) -> Result<Vec<Vec<ScoredDocument>>>
    where
        S: AsRef<str> + Sync,
    {
        process_queries(&self.inner.read(), queries)
    }

    pub fn document_count(&self) -> usize { self.inner.read().document_count() }
}
