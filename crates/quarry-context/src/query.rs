//! The context handed to callers after resolution.

use crate::active::ActiveContext;
use crate::contract::{Context, ContextKind};
use crate::none::NullContext;
use quarry_core::{Criteria, Document, Error, MemoryStore, Result, Store, Value};
use std::convert::Infallible;
use std::fmt;

/// A resolved query context.
///
/// Wraps exactly one variant, chosen once by the [`Resolver`](crate::Resolver)
/// and fixed for the lifetime of the value. Callers use it through
/// [`Context`] and cannot see which variant they hold.
pub struct QueryContext<'a, S: Store + ?Sized = MemoryStore> {
    inner: Variant<'a, S>,
}

enum Variant<'a, S: Store + ?Sized> {
    Null(NullContext<'a>),
    Active(ActiveContext<'a, S>),
}

fn never<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl<'a, S: Store + ?Sized> QueryContext<'a, S> {
    pub(crate) fn null(criteria: &'a Criteria) -> Self {
        QueryContext {
            inner: Variant::Null(NullContext::new(criteria)),
        }
    }

    pub(crate) fn active(criteria: &'a Criteria, store: &'a S) -> Self {
        QueryContext {
            inner: Variant::Active(ActiveContext::new(criteria, store)),
        }
    }
}

impl<S: Store + ?Sized> fmt::Debug for QueryContext<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Variant::Null(ctx) => fmt::Debug::fmt(ctx, f),
            Variant::Active(ctx) => fmt::Debug::fmt(ctx, f),
        }
    }
}

impl<S: Store + ?Sized> Context for QueryContext<'_, S> {
    type Error = Error;
    type Iter<'c>
        = Box<dyn Iterator<Item = Document> + 'c>
    where
        Self: 'c;

    fn kind(&self) -> ContextKind {
        match &self.inner {
            Variant::Null(ctx) => ctx.kind(),
            Variant::Active(ctx) => ctx.kind(),
        }
    }

    fn criteria(&self) -> &Criteria {
        match &self.inner {
            Variant::Null(ctx) => ctx.criteria(),
            Variant::Active(ctx) => ctx.criteria(),
        }
    }

    fn entity(&self) -> &str {
        match &self.inner {
            Variant::Null(ctx) => ctx.entity(),
            Variant::Active(ctx) => ctx.entity(),
        }
    }

    // The empty iterator is zero-sized, so boxing it does not allocate.
    fn iter(&self) -> Result<Self::Iter<'_>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(Box::new(never(ctx.iter()))),
            Variant::Active(ctx) => Ok(Box::new(ctx.iter()?)),
        }
    }

    fn exists(&self) -> Result<bool> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.exists())),
            Variant::Active(ctx) => ctx.exists(),
        }
    }

    fn count(&self) -> Result<usize> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.count())),
            Variant::Active(ctx) => ctx.count(),
        }
    }

    fn first(&self) -> Result<Option<Document>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.first())),
            Variant::Active(ctx) => ctx.first(),
        }
    }

    fn last(&self) -> Result<Option<Document>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.last())),
            Variant::Active(ctx) => ctx.last(),
        }
    }

    fn take(&self, limit: usize) -> Result<Vec<Document>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.take(limit))),
            Variant::Active(ctx) => ctx.take(limit),
        }
    }

    fn distinct(&self, field: &str) -> Result<Vec<Value>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.distinct(field))),
            Variant::Active(ctx) => ctx.distinct(field),
        }
    }

    fn pluck(&self, fields: &[&str]) -> Result<Vec<Vec<Value>>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.pluck(fields))),
            Variant::Active(ctx) => ctx.pluck(fields),
        }
    }

    fn pick(&self, fields: &[&str]) -> Result<Option<Vec<Value>>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.pick(fields))),
            Variant::Active(ctx) => ctx.pick(fields),
        }
    }

    fn tally(&self, field: &str) -> Result<Vec<(Value, usize)>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.tally(field))),
            Variant::Active(ctx) => ctx.tally(field),
        }
    }

    fn sum(&self, field: &str) -> Result<Value> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.sum(field))),
            Variant::Active(ctx) => ctx.sum(field),
        }
    }

    fn avg(&self, field: &str) -> Result<Option<Value>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.avg(field))),
            Variant::Active(ctx) => ctx.avg(field),
        }
    }

    fn min(&self, field: &str) -> Result<Option<Value>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.min(field))),
            Variant::Active(ctx) => ctx.min(field),
        }
    }

    fn max(&self, field: &str) -> Result<Option<Value>> {
        match &self.inner {
            Variant::Null(ctx) => Ok(never(ctx.max(field))),
            Variant::Active(ctx) => ctx.max(field),
        }
    }

    fn equals<C>(&self, other: &C) -> bool
    where
        C: Context + ?Sized,
    {
        match &self.inner {
            Variant::Null(ctx) => ctx.equals(other),
            Variant::Active(ctx) => ctx.equals(other),
        }
    }
}

impl<S: Store + ?Sized> PartialEq for QueryContext<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
