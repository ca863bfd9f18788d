//! Document store boundary for profile documents

use async_trait::async_trait;
use common::error::StoreError;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

/// Document store trait defining the interface for profile storage
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write (create or replace) a document
    async fn set_document(&self, collection: &str, key: &str, fields: Value) -> Result<(), StoreError>;

    /// Read a document, `None` if it does not exist
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;
}

/// In-memory document store
#[derive(Default)]
pub struct InMemoryDocumentStore {
    /// Documents by collection and key
    pub documents: DashMap<(String, String), Value>,
}

impl InMemoryDocumentStore {
    /// Create a new in-memory document store
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Peek at a stored document
    pub fn document(&self, collection: &str, key: &str) -> Option<Value> {
        self.documents
            .get(&(collection.to_string(), key.to_string()))
            .map(|d| d.clone())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn set_document(&self, collection: &str, key: &str, fields: Value) -> Result<(), StoreError> {
        if !fields.is_object() {
            return Err(StoreError::new(
                "invalid-argument",
                format!("Document {}/{} must be an object", collection, key),
            ));
        }

        debug!("Writing document {}/{}", collection, key);
        self.documents.insert((collection.to_string(), key.to_string()), fields);
        Ok(())
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        debug!("Reading document {}/{}", collection, key);
        Ok(self.document(collection, key))
    }
}
