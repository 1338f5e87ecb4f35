//! Document stores.
//!
//! A [`Store`] is the backing collection a store-backed context reads from.
//! [`MemoryStore`] keeps everything in process behind a lock.

use crate::document::Document;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Source of documents, grouped by entity type
pub trait Store: Send + Sync {
    /// Returns every document stored for `entity`.
    ///
    /// An entity that was never written yields an empty list, not an error.
    fn scan(&self, entity: &str) -> Result<Vec<Document>>;
}

/// In-memory store keyed by entity type
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document to an entity's collection
    pub fn insert(&self, entity: &str, doc: Document) -> Result<()> {
        let mut collections = self.collections.write().map_err(|_| Error::LockPoisoned)?;
        collections.entry(entity.to_string()).or_default().push(doc);
        Ok(())
    }

    /// Appends several documents at once
    pub fn insert_many<I>(&self, entity: &str, docs: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut collections = self.collections.write().map_err(|_| Error::LockPoisoned)?;
        collections
            .entry(entity.to_string())
            .or_default()
            .extend(docs);
        Ok(())
    }

    /// Number of documents stored for an entity
    pub fn len(&self, entity: &str) -> Result<usize> {
        let collections = self.collections.read().map_err(|_| Error::LockPoisoned)?;
        Ok(collections.get(entity).map_or(0, Vec::len))
    }

    /// Returns `true` if nothing is stored for the entity
    pub fn is_empty(&self, entity: &str) -> Result<bool> {
        Ok(self.len(entity)? == 0)
    }

    /// Drops every collection
    pub fn clear(&self) -> Result<()> {
        let mut collections = self.collections.write().map_err(|_| Error::LockPoisoned)?;
        collections.clear();
        Ok(())
    }
}

impl Store for MemoryStore {
    fn scan(&self, entity: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().map_err(|_| Error::LockPoisoned)?;
        Ok(collections.get(entity).cloned().unwrap_or_default())
    }
}
