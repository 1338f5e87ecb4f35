//! The context contract shared by every query context variant.

use crate::aggregate;
use quarry_core::{Criteria, Document, Value};
use std::fmt;

/// Which execution strategy a context uses.
///
/// Exposed only so contexts can compare themselves; callers should not
/// branch on it.
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Proven empty; never touches a store
    Null,
    /// Reads the backing store
    Active,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKind::Null => write!(f, "null"),
            ContextKind::Active => write!(f, "active"),
        }
    }
}

/// A query criteria bound to an execution strategy.
///
/// Implementors provide [`iter`](Context::iter), [`kind`](Context::kind) and
/// [`criteria`](Context::criteria). Every other operation has a default
/// derived from iteration, so `count`, `first`, `last` and the aggregates
/// cannot drift from what `iter` yields. Overrides must keep that relationship.
///
/// # Field arguments
///
/// Implementors may validate the field names passed to
/// [`distinct`](Context::distinct), [`pluck`](Context::pluck) and the
/// aggregates, reporting bad names through `Self::Error`. Contexts that can
/// answer without reading any document must not validate: an empty answer is
/// what the caller would see from any variant, and a validation error would
/// only appear on that path.
///
/// # Errors
///
/// The contract defines no error kinds. Each variant picks its own error
/// type; a variant that cannot fail uses [`std::convert::Infallible`].
pub trait Context {
    /// Failure type of this variant
    type Error: std::error::Error;

    /// Lazy sequence of matching documents
    type Iter<'c>: Iterator<Item = Document>
    where
        Self: 'c;

    /// The execution strategy. Used by [`equals`](Context::equals); not part
    /// of the caller-facing surface.
    #[doc(hidden)]
    fn kind(&self) -> ContextKind;

    /// The criteria this context was built from
    fn criteria(&self) -> &Criteria;

    /// The target entity type
    fn entity(&self) -> &str {
        self.criteria().entity()
    }

    /// Iterates the matching documents.
    ///
    /// Each call starts a fresh iteration where the variant supports
    /// re-execution.
    fn iter(&self) -> Result<Self::Iter<'_>, Self::Error>;

    /// Calls `f` once per matching document and returns the context so calls
    /// can be chained.
    fn each<F>(&self, mut f: F) -> Result<&Self, Self::Error>
    where
        Self: Sized,
        F: FnMut(Document),
    {
        for doc in self.iter()? {
            f(doc);
        }
        Ok(self)
    }

    /// Whether any document matches
    fn exists(&self) -> Result<bool, Self::Error> {
        Ok(self.iter()?.next().is_some())
    }

    /// Number of matching documents, equal to the length of [`iter`](Context::iter)
    fn count(&self) -> Result<usize, Self::Error> {
        Ok(self.iter()?.count())
    }

    /// The first matching document
    fn first(&self) -> Result<Option<Document>, Self::Error> {
        Ok(self.iter()?.next())
    }

    /// The last matching document
    fn last(&self) -> Result<Option<Document>, Self::Error> {
        Ok(self.iter()?.last())
    }

    /// Up to `limit` matching documents, in iteration order
    fn take(&self, limit: usize) -> Result<Vec<Document>, Self::Error> {
        Ok(self.iter()?.take(limit).collect())
    }

    /// Distinct values of `field` across matching documents
    fn distinct(&self, field: &str) -> Result<Vec<Value>, Self::Error> {
        Ok(aggregate::distinct(self.iter()?, field))
    }

    /// One row of `fields` values per matching document
    fn pluck(&self, fields: &[&str]) -> Result<Vec<Vec<Value>>, Self::Error> {
        Ok(aggregate::pluck(self.iter()?, fields))
    }

    /// The first row [`pluck`](Context::pluck) would return
    fn pick(&self, fields: &[&str]) -> Result<Option<Vec<Value>>, Self::Error> {
        Ok(self.pluck(fields)?.into_iter().next())
    }

    /// Occurrences of each value of `field`
    fn tally(&self, field: &str) -> Result<Vec<(Value, usize)>, Self::Error> {
        Ok(aggregate::tally(self.iter()?, field))
    }

    /// Numeric sum of `field`; `Integer(0)` when nothing matches
    fn sum(&self, field: &str) -> Result<Value, Self::Error> {
        Ok(aggregate::sum(self.iter()?, field))
    }

    /// Numeric mean of `field`
    fn avg(&self, field: &str) -> Result<Option<Value>, Self::Error> {
        Ok(aggregate::avg(self.iter()?, field))
    }

    /// Smallest value of `field`
    fn min(&self, field: &str) -> Result<Option<Value>, Self::Error> {
        Ok(aggregate::min(self.iter()?, field))
    }

    /// Largest value of `field`
    fn max(&self, field: &str) -> Result<Option<Value>, Self::Error> {
        Ok(aggregate::max(self.iter()?, field))
    }

    /// Structural equality: same variant over equal criteria.
    ///
    /// Never compares the documents themselves.
    fn equals<C>(&self, other: &C) -> bool
    where
        C: Context + ?Sized,
    {
        self.kind() == other.kind() && self.criteria() == other.criteria()
    }
}
