//! # Quarry
//!
//! A document-store query layer. Build a [`Criteria`], hand it to a
//! [`Database`], and get back a [`QueryContext`] that answers iteration,
//! existence, counting, projection and aggregation.
//!
//! Criteria that provably match nothing (`none()`, `limit(0)`, a missing
//! parent key, contradictory filters) resolve to a null context that answers
//! without reading the store. Callers never see the difference.
//!
//! ## Quick Start
//!
//! ```rust
//! use quarry::{Context, Criteria, Database, Document, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::in_memory();
//!
//!     db.insert("Order", Document::new().with("id", 1).with("status", "open").with("total", 30))?;
//!     db.insert("Order", Document::new().with("id", 2).with("status", "paid").with("total", 12))?;
//!
//!     let open = Criteria::new("Order").where_eq("status", "open");
//!     let ctx = db.query(&open);
//!     assert!(ctx.exists()?);
//!     assert_eq!(ctx.sum("total")?, Value::Integer(30));
//!
//!     // Never reaches the store
//!     let nothing = Criteria::new("Order").none();
//!     let ctx = db.query(&nothing);
//!     assert_eq!(ctx.count()?, 0);
//!     assert!(ctx.pluck(&["id", "total"])?.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! ```rust,no_run
//! use quarry::logging::LogConfig;
//!
//! let _guard = LogConfig::debug().with_query_tracing(true).init()?;
//! # Ok::<(), quarry::Error>(())
//! ```

use std::sync::Arc;
use tracing::debug;

pub mod logging;

// Re-export core types
pub use quarry_core::{
    CompareOp, Criteria, Direction, Document, Error, Expression, LogicalOp, MemoryStore, Result,
    SortKey, Store, Value,
};

// Context components
pub use quarry_context::{
    ActiveContext, Context, EmptyReason, NullContext, QueryContext, Resolver, ResolverConfig,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main database handle.
///
/// Owns an in-memory document store and the resolver that binds criteria to
/// contexts. Thread-safe; clones share the same store.
///
/// # Examples
///
/// ```rust
/// use quarry::{Context, Criteria, Database, Document};
///
/// let db = Database::in_memory();
/// db.insert("Customer", Document::new().with("id", 10).with("name", "Ada"))?;
///
/// let unsaved_parent = Criteria::new("Order").for_parent("customer_id", None);
/// assert!(!db.query(&unsaved_parent).exists()?);
/// # Ok::<(), quarry::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Database {
    store: Arc<MemoryStore>,
    resolver: Resolver,
}

impl Database {
    /// Creates an empty in-memory database with the default resolver.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Creates an empty in-memory database with a custom resolver configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quarry::{Database, ResolverConfig};
    ///
    /// let db = Database::with_config(ResolverConfig::default().with_predicate_analysis(false));
    /// assert!(!db.resolver().config().analyze_predicates);
    /// ```
    pub fn with_config(config: ResolverConfig) -> Self {
        debug!(
            analyze_predicates = config.analyze_predicates,
            "opened in-memory database"
        );
        Database {
            store: Arc::new(MemoryStore::new()),
            resolver: Resolver::with_config(config),
        }
    }

    /// Appends a document to `entity`'s collection.
    pub fn insert(&self, entity: &str, doc: Document) -> Result<()> {
        self.store.insert(entity, doc)?;
        debug!(entity, "inserted one document");
        Ok(())
    }

    /// Appends several documents to `entity`'s collection.
    pub fn insert_many<I>(&self, entity: &str, docs: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        let docs: Vec<Document> = docs.into_iter().collect();
        let count = docs.len();
        self.store.insert_many(entity, docs)?;
        debug!(entity, count, "inserted documents");
        Ok(())
    }

    /// Binds `criteria` to a context.
    ///
    /// The variant is chosen here, once. The context borrows both the
    /// database and the criteria, and re-reads the store on every call.
    pub fn query<'a>(&'a self, criteria: &'a Criteria) -> QueryContext<'a> {
        self.resolver.resolve(criteria, self.store.as_ref())
    }

    /// Number of documents stored for `entity`
    pub fn len(&self, entity: &str) -> Result<usize> {
        self.store.len(entity)
    }

    /// Whether `entity` has no stored documents
    pub fn is_empty(&self, entity: &str) -> Result<bool> {
        self.store.is_empty(entity)
    }

    /// Removes every document of every entity.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        debug!("cleared all entities");
        Ok(())
    }

    /// The resolver used by [`query`](Database::query)
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The underlying store
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}
