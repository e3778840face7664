//! MongoGateway - the production gateway over a MongoDB collection.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};

use super::{GatewayError, MovieCursor, MovieGateway};
use crate::config::StoreConfig;
use crate::model::{IdFilter, InsertDocument, MovieId, ReplaceSet};

/// Gateway bound to one collection of one database.
///
/// Clone-friendly: the driver client pools connections internally and is
/// safe to share between in-flight calls.
#[derive(Clone, Debug)]
pub struct MongoGateway {
    client: Client,
    collection: Collection<Document>,
}

impl MongoGateway {
    /// Connect, verify the server answers a ping, and bind the configured
    /// database and collection.
    pub async fn connect(config: &StoreConfig) -> Result<Self, GatewayError> {
        let client = Client::with_uri_str(config.uri.as_str())
            .await
            .map_err(storage_error)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(storage_error)?;
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "connected to MongoDB"
        );

        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);
        Ok(Self { client, collection })
    }
}

fn storage_error(err: mongodb::error::Error) -> GatewayError {
    GatewayError::Storage(err.to_string())
}

#[async_trait]
impl MovieGateway for MongoGateway {
    async fn insert_one(&self, document: InsertDocument) -> Result<MovieId, GatewayError> {
        let result = self
            .collection
            .insert_one(document.into_document())
            .await
            .map_err(storage_error)?;
        result
            .inserted_id
            .as_object_id()
            .map(MovieId::from)
            .ok_or_else(|| {
                GatewayError::Storage(format!(
                    "inserted id is not an object id: {}",
                    result.inserted_id
                ))
            })
    }

    async fn find_by_id(&self, filter: IdFilter) -> Result<Document, GatewayError> {
        self.collection
            .find_one(filter.to_document())
            .await
            .map_err(storage_error)?
            .ok_or(GatewayError::NotFound { id: filter.id() })
    }

    async fn find_all(&self) -> Result<MovieCursor, GatewayError> {
        let cursor = self
            .collection
            .find(Document::new())
            .await
            .map_err(|e| GatewayError::Query(e.to_string()))?;
        // Dropping the driver cursor kills it server-side.
        Ok(MovieCursor::new(
            cursor.map_err(|e| GatewayError::Cursor(e.to_string())),
        ))
    }

    async fn replace_by_id(
        &self,
        filter: IdFilter,
        update: ReplaceSet,
    ) -> Result<Document, GatewayError> {
        self.collection
            .find_one_and_update(filter.to_document(), update.to_document())
            .return_document(ReturnDocument::After)
            .await
            .map_err(storage_error)?
            .ok_or(GatewayError::NotFound { id: filter.id() })
    }

    async fn delete_by_id(&self, filter: IdFilter) -> Result<(), GatewayError> {
        let result = self
            .collection
            .delete_one(filter.to_document())
            .await
            .map_err(storage_error)?;
        if result.deleted_count == 0 {
            return Err(GatewayError::NotFound { id: filter.id() });
        }
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
    }
}
