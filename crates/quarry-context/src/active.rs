//! Store-backed query context.

use crate::aggregate;
use crate::contract::{Context, ContextKind};
use quarry_core::eval;
use quarry_core::{Criteria, Document, Error, Result, Store, Value};
use std::fmt;
use tracing::trace;

/// Context that runs its criteria against a [`Store`].
///
/// Every call to [`iter`](Context::iter) re-executes the query: scan the
/// entity's collection, filter, sort, skip, limit, then apply the projection.
/// Field arguments are validated before any document is read.
pub struct ActiveContext<'a, S: Store + ?Sized> {
    criteria: &'a Criteria,
    store: &'a S,
}

impl<'a, S: Store + ?Sized> ActiveContext<'a, S> {
    /// Binds `criteria` to `store`
    pub fn new(criteria: &'a Criteria, store: &'a S) -> Self {
        ActiveContext { criteria, store }
    }

    /// Matching documents before projection
    fn matching(&self) -> Result<Vec<Document>> {
        let criteria = self.criteria;
        let scanned = self.store.scan(criteria.entity())?;
        let scanned_len = scanned.len();

        let mut docs: Vec<Document> = match criteria.filter_expr() {
            Some(condition) => scanned
                .into_iter()
                .filter(|doc| eval::matches(doc, condition))
                .collect(),
            None => scanned,
        };

        if !criteria.sort_keys().is_empty() {
            docs.sort_by(|a, b| eval::compare_documents(a, b, criteria.sort_keys()));
        }

        let docs: Vec<Document> = docs
            .into_iter()
            .skip(criteria.skip_count())
            .take(criteria.limit_count().unwrap_or(usize::MAX))
            .collect();

        trace!(
            entity = criteria.entity(),
            scanned = scanned_len,
            matched = docs.len(),
            "executed criteria"
        );
        Ok(docs)
    }
}

// Manual impls: derives would require `S: Clone + Debug`.
impl<S: Store + ?Sized> fmt::Debug for ActiveContext<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveContext")
            .field("criteria", &self.criteria)
            .finish_non_exhaustive()
    }
}

impl<S: Store + ?Sized> Clone for ActiveContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Store + ?Sized> Copy for ActiveContext<'_, S> {}

fn validate_field(field: &str) -> Result<()> {
    if field.trim().is_empty() || field.starts_with('$') {
        return Err(Error::InvalidField(field.to_string()));
    }
    Ok(())
}

fn validate_fields(fields: &[&str]) -> Result<()> {
    if fields.is_empty() {
        return Err(Error::InvalidOperation(
            "pluck requires at least one field".to_string(),
        ));
    }
    fields.iter().try_for_each(|field| validate_field(field))
}

impl<S: Store + ?Sized> Context for ActiveContext<'_, S> {
    type Error = Error;
    type Iter<'c>
        = std::vec::IntoIter<Document>
    where
        Self: 'c;

    fn kind(&self) -> ContextKind {
        ContextKind::Active
    }

    fn criteria(&self) -> &Criteria {
        self.criteria
    }

    fn iter(&self) -> Result<Self::Iter<'_>> {
        let docs = self.matching()?;
        let docs = match self.criteria.projection() {
            Some(fields) => docs.iter().map(|doc| doc.project(fields)).collect(),
            None => docs,
        };
        Ok(docs.into_iter())
    }

    // Projections and aggregates read the unprojected documents so that
    // `only(..)` does not hide the fields they ask for.

    fn distinct(&self, field: &str) -> Result<Vec<Value>> {
        validate_field(field)?;
        Ok(aggregate::distinct(self.matching()?, field))
    }

    fn pluck(&self, fields: &[&str]) -> Result<Vec<Vec<Value>>> {
        validate_fields(fields)?;
        Ok(aggregate::pluck(self.matching()?, fields))
    }

    fn tally(&self, field: &str) -> Result<Vec<(Value, usize)>> {
        validate_field(field)?;
        Ok(aggregate::tally(self.matching()?, field))
    }

    fn sum(&self, field: &str) -> Result<Value> {
        validate_field(field)?;
        Ok(aggregate::sum(self.matching()?, field))
    }

    fn avg(&self, field: &str) -> Result<Option<Value>> {
        validate_field(field)?;
        Ok(aggregate::avg(self.matching()?, field))
    }

    fn min(&self, field: &str) -> Result<Option<Value>> {
        validate_field(field)?;
        Ok(aggregate::min(self.matching()?, field))
    }

    fn max(&self, field: &str) -> Result<Option<Value>> {
        validate_field(field)?;
        Ok(aggregate::max(self.matching()?, field))
    }
}
