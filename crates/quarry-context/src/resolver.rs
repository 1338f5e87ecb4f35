//! Context selection.
//!
//! The resolver runs the emptiness analysis once per criteria and hands back
//! a [`QueryContext`] bound to the chosen variant.

use crate::emptiness::{self, EmptyReason};
use crate::query::QueryContext;
use quarry_core::{Criteria, Store};
use tracing::debug;

/// Resolver configuration options
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Inspect filter predicates for contradictions. When off, only
    /// explicitly marked criteria and `limit(0)` resolve to a null context.
    pub analyze_predicates: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            analyze_predicates: true,
        }
    }
}

impl ResolverConfig {
    /// Enable or disable predicate analysis
    pub fn with_predicate_analysis(mut self, enabled: bool) -> Self {
        self.analyze_predicates = enabled;
        self
    }
}

/// Chooses the context variant for a criteria
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with custom configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Why `criteria` is provably empty, or `None` if it may match
    pub fn emptiness(&self, criteria: &Criteria) -> Option<EmptyReason> {
        emptiness::analyze(criteria, self.config.analyze_predicates)
    }

    /// Binds `criteria` to a context.
    ///
    /// Provably empty criteria get a null context and `store` is never
    /// touched; everything else reads `store`.
    pub fn resolve<'a, S>(&self, criteria: &'a Criteria, store: &'a S) -> QueryContext<'a, S>
    where
        S: Store + ?Sized,
    {
        match self.emptiness(criteria) {
            Some(reason) => {
                debug!(
                    entity = criteria.entity(),
                    %reason,
                    "criteria resolved to null context"
                );
                QueryContext::null(criteria)
            }
            None => {
                debug!(
                    entity = criteria.entity(),
                    "criteria resolved to active context"
                );
                QueryContext::active(criteria, store)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Context, ContextKind};
    use quarry_core::{Document, Expression, MemoryStore, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that counts scans
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        scans: AtomicUsize,
    }

    impl Store for CountingStore {
        fn scan(&self, entity: &str) -> Result<Vec<Document>> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.inner.scan(entity)
        }
    }

    #[test]
    fn test_null_context_never_scans() {
        let store = CountingStore::default();
        store
            .inner
            .insert("Order", Document::new().with("status", "open"))
            .unwrap();

        let criteria = Criteria::new("Order").none();
        let ctx = Resolver::new().resolve(&criteria, &store);
        assert_eq!(ctx.kind(), ContextKind::Null);
        assert!(!ctx.exists().unwrap());
        assert_eq!(ctx.count().unwrap(), 0);
        assert!(ctx.distinct("status").unwrap().is_empty());
        assert!(ctx.pluck(&["status"]).unwrap().is_empty());
        assert_eq!(ctx.first().unwrap(), None);
        assert_eq!(store.scans.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_active_context_scans() {
        let store = CountingStore::default();
        store
            .inner
            .insert("Order", Document::new().with("status", "open"))
            .unwrap();

        let criteria = Criteria::new("Order").where_eq("status", "open");
        let ctx = Resolver::new().resolve(&criteria, &store);
        assert_eq!(ctx.kind(), ContextKind::Active);
        assert_eq!(ctx.count().unwrap(), 1);
        assert_eq!(store.scans.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_predicate_analysis_toggle() {
        let store = MemoryStore::new();
        let criteria = Criteria::new("Order").filter(Expression::in_list("id", Vec::<i64>::new()));

        let resolver = Resolver::new();
        assert_eq!(
            resolver.emptiness(&criteria),
            Some(EmptyReason::ContradictoryPredicate)
        );
        assert_eq!(resolver.resolve(&criteria, &store).kind(), ContextKind::Null);

        let resolver =
            Resolver::with_config(ResolverConfig::default().with_predicate_analysis(false));
        assert_eq!(resolver.emptiness(&criteria), None);
        let ctx = resolver.resolve(&criteria, &store);
        assert_eq!(ctx.kind(), ContextKind::Active);
        assert_eq!(ctx.count().unwrap(), 0);
    }
}
