//! Storage gateway — collection-scoped document operations for movies.
//!
//! Handlers never touch the database directly; they hold an `Arc<G>` where
//! `G: MovieGateway`. Two backends ship with the crate:
//!
//! - [`MongoGateway`] — a MongoDB collection (production).
//! - [`InMemoryGateway`] — a `RwLock`-guarded document list for tests and
//!   local runs, with fault injection for the error paths.
//!
//! Both speak the typed vocabulary from [`crate::model`] and hand back raw
//! documents; decoding into [`crate::model::MovieRecord`] is the caller's job
//! so that decode failures stay distinguishable from storage failures.

mod cursor;
mod in_memory;
mod mongo;

use std::fmt;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::model::{IdFilter, InsertDocument, MovieId, ReplaceSet};

pub use cursor::MovieCursor;
pub use in_memory::InMemoryGateway;
pub use mongo::MongoGateway;

/// Collection-scoped storage operations.
#[async_trait]
pub trait MovieGateway: Send + Sync + 'static {
    /// Insert a new document and return the identifier storage assigned.
    async fn insert_one(&self, document: InsertDocument) -> Result<MovieId, GatewayError>;

    /// Fetch the matching document, or `GatewayError::NotFound`.
    async fn find_by_id(&self, filter: IdFilter) -> Result<Document, GatewayError>;

    /// Open a forward-only cursor over every document in the collection.
    async fn find_all(&self) -> Result<MovieCursor, GatewayError>;

    /// Replace all non-identifier fields and return the document as it is
    /// after the update, or `GatewayError::NotFound`.
    async fn replace_by_id(
        &self,
        filter: IdFilter,
        update: ReplaceSet,
    ) -> Result<Document, GatewayError>;

    /// Remove the matching document, or `GatewayError::NotFound` if there
    /// was none.
    async fn delete_by_id(&self, filter: IdFilter) -> Result<(), GatewayError>;

    /// Release the underlying connection. Called once, after the server has
    /// stopped accepting calls.
    async fn close(&self) {}
}

/// Error type for gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No document matches the identifier.
    NotFound { id: MovieId },
    /// Opening a query failed before any result was produced.
    Query(String),
    /// An open cursor failed while being iterated.
    Cursor(String),
    /// Connection, driver, or lock failure.
    Storage(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::NotFound { id } => write!(f, "no movie with object id {}", id),
            GatewayError::Query(msg) => write!(f, "query failed: {}", msg),
            GatewayError::Cursor(msg) => write!(f, "cursor error: {}", msg),
            GatewayError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}
