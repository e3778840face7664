//! InMemoryGateway - document-list gateway for testing and local development.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use futures_util::stream;
use mongodb::bson::Document;

use super::{GatewayError, MovieCursor, MovieGateway};
use crate::model::{field, IdFilter, InsertDocument, MovieId, ReplaceSet};

#[derive(Default)]
struct State {
    documents: RwLock<Vec<Document>>,
    open_cursors: AtomicUsize,
    closed: AtomicBool,
    fail_queries: AtomicBool,
    fail_cursor_after: RwLock<Option<usize>>,
    stall_reads: AtomicBool,
    abandoned_reads: AtomicUsize,
}

/// Held by a stalled `find_by_id`; counts the read as abandoned once its
/// future is dropped.
struct AbandonOnDrop(Arc<State>);

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        self.0.abandoned_reads.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory gateway storing BSON documents in insertion order.
///
/// Clone-friendly via Arc; every clone sees the same documents. Documents
/// go through the same typed vocabulary as the MongoDB backend, so the
/// storage encoding is exercised end to end.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<State>,
}

impl InMemoryGateway {
    /// Create a new empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document verbatim, bypassing encoding. Used to seed documents
    /// that another writer may have left in the collection.
    pub fn insert_raw(&self, document: Document) -> Result<(), GatewayError> {
        self.write()?.push(document);
        Ok(())
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> Result<usize, GatewayError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, GatewayError> {
        Ok(self.read()?.is_empty())
    }

    /// Cursors handed out by `find_all` that have not been dropped yet.
    #[doc(hidden)]
    pub fn open_cursors(&self) -> usize {
        self.state.open_cursors.load(Ordering::SeqCst)
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }

    /// Make every subsequent `find_all` fail before returning a cursor.
    #[doc(hidden)]
    pub fn fail_queries(&self, fail: bool) {
        self.state.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Make cursors from subsequent `find_all` calls fail after yielding `n`
    /// documents. `None` restores normal iteration.
    #[doc(hidden)]
    pub fn fail_cursor_after(&self, n: Option<usize>) -> Result<(), GatewayError> {
        *self
            .state
            .fail_cursor_after
            .write()
            .map_err(|_| GatewayError::Storage("lock poisoned".into()))? = n;
        Ok(())
    }

    /// Make subsequent `find_by_id` calls wait forever, so only dropping
    /// the call ends them.
    #[doc(hidden)]
    pub fn stall_reads(&self, stall: bool) {
        self.state.stall_reads.store(stall, Ordering::SeqCst);
    }

    /// Stalled `find_by_id` futures that were dropped before finishing.
    #[doc(hidden)]
    pub fn abandoned_reads(&self) -> usize {
        self.state.abandoned_reads.load(Ordering::SeqCst)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Document>>, GatewayError> {
        self.state
            .documents
            .read()
            .map_err(|_| GatewayError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Document>>, GatewayError> {
        self.state
            .documents
            .write()
            .map_err(|_| GatewayError::Storage("lock poisoned".into()))
    }
}

#[async_trait]
impl MovieGateway for InMemoryGateway {
    async fn insert_one(&self, document: InsertDocument) -> Result<MovieId, GatewayError> {
        let id = MovieId::generate();
        let mut stored = Document::new();
        stored.insert(field::ID, id.object_id());
        for (key, value) in document.into_document() {
            stored.insert(key, value);
        }
        self.write()?.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, filter: IdFilter) -> Result<Document, GatewayError> {
        if self.state.stall_reads.load(Ordering::SeqCst) {
            let _abandon = AbandonOnDrop(self.state.clone());
            std::future::pending::<()>().await;
        }

        self.read()?
            .iter()
            .find(|doc| filter.matches(doc))
            .cloned()
            .ok_or(GatewayError::NotFound { id: filter.id() })
    }

    async fn find_all(&self) -> Result<MovieCursor, GatewayError> {
        if self.state.fail_queries.load(Ordering::SeqCst) {
            return Err(GatewayError::Query("injected query failure".into()));
        }

        let mut items: Vec<Result<Document, GatewayError>> =
            self.read()?.iter().cloned().map(Ok).collect();
        let fail_after = *self
            .state
            .fail_cursor_after
            .read()
            .map_err(|_| GatewayError::Storage("lock poisoned".into()))?;
        if let Some(n) = fail_after {
            items.truncate(n);
            items.push(Err(GatewayError::Cursor("injected cursor failure".into())));
        }

        self.state.open_cursors.fetch_add(1, Ordering::SeqCst);
        let state = self.state.clone();
        Ok(MovieCursor::new(stream::iter(items)).on_release(move || {
            state.open_cursors.fetch_sub(1, Ordering::SeqCst);
        }))
    }

    async fn replace_by_id(
        &self,
        filter: IdFilter,
        update: ReplaceSet,
    ) -> Result<Document, GatewayError> {
        let mut docs = self.write()?;
        let stored = docs
            .iter_mut()
            .find(|doc| filter.matches(doc))
            .ok_or(GatewayError::NotFound { id: filter.id() })?;
        update.apply(stored);
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, filter: IdFilter) -> Result<(), GatewayError> {
        let mut docs = self.write()?;
        let index = docs
            .iter()
            .position(|doc| filter.matches(doc))
            .ok_or(GatewayError::NotFound { id: filter.id() })?;
        docs.remove(index);
        Ok(())
    }

    async fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }
}
