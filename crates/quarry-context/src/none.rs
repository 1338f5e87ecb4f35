//! The null context: a criteria proven to match nothing.

use crate::contract::{Context, ContextKind};
use quarry_core::{Criteria, Document};
use std::convert::Infallible;
use std::iter;

/// Context for criteria that provably match no documents.
///
/// Holds only references to the criteria and its entity type, so building
/// one is O(1) and allocation-free, and it is `Copy + Send + Sync`. Every
/// answer follows from iteration yielding nothing; no operation can fail,
/// which is why the error type is [`Infallible`].
///
/// Field arguments are never inspected, so `distinct("")` is as empty as
/// `distinct("status")`.
///
/// # Examples
///
/// ```rust
/// use quarry_context::{Context, NullContext};
/// use quarry_core::Criteria;
///
/// let criteria = Criteria::new("Order").where_eq("status", "nonexistent");
/// let ctx = NullContext::new(&criteria);
///
/// assert!(!ctx.exists().unwrap());
/// assert_eq!(ctx.count().unwrap(), 0);
/// assert!(ctx.pluck(&["id", "total"]).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NullContext<'a> {
    criteria: &'a Criteria,
    entity: &'a str,
}

impl<'a> NullContext<'a> {
    /// Creates a null context. The criteria is not validated.
    pub fn new(criteria: &'a Criteria) -> Self {
        NullContext {
            criteria,
            entity: criteria.entity(),
        }
    }
}

impl<'a> Context for NullContext<'a> {
    type Error = Infallible;
    type Iter<'c>
        = iter::Empty<Document>
    where
        Self: 'c;

    fn kind(&self) -> ContextKind {
        ContextKind::Null
    }

    fn criteria(&self) -> &Criteria {
        self.criteria
    }

    fn entity(&self) -> &str {
        self.entity
    }

    fn iter(&self) -> Result<Self::Iter<'_>, Infallible> {
        Ok(iter::empty())
    }

    /// True iff `other` is also a null context, whatever its criteria.
    fn equals<C>(&self, other: &C) -> bool
    where
        C: Context + ?Sized,
    {
        other.kind() == ContextKind::Null
    }
}

impl PartialEq for NullContext<'_> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for NullContext<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{Expression, Value};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_null_context_is_send_sync() {
        assert_send_sync::<NullContext<'static>>();
    }

    #[test]
    fn test_entity_derived_from_criteria() {
        let criteria = Criteria::new("Order");
        let ctx = NullContext::new(&criteria);
        assert_eq!(ctx.entity(), "Order");
        assert_eq!(ctx.criteria(), &criteria);
        assert_eq!(ctx.kind(), ContextKind::Null);
    }

    #[test]
    fn test_iteration_is_empty_and_restartable() {
        let criteria = Criteria::new("Order");
        let ctx = NullContext::new(&criteria);
        assert_eq!(ctx.iter().unwrap().count(), 0);
        assert_eq!(ctx.iter().unwrap().next(), None);
        assert_eq!(ctx.count().unwrap(), ctx.iter().unwrap().count());
    }

    #[test]
    fn test_answers_follow_iteration() {
        let criteria = Criteria::new("Order").limit(0);
        let ctx = NullContext::new(&criteria);
        assert_eq!(ctx.exists().unwrap(), ctx.iter().unwrap().next().is_some());
        assert_eq!(ctx.first().unwrap(), ctx.iter().unwrap().next());
        assert_eq!(ctx.last().unwrap(), ctx.iter().unwrap().last());
        assert_eq!(
            ctx.distinct("status").unwrap().len(),
            ctx.iter().unwrap().count()
        );
        assert_eq!(
            ctx.pluck(&["id", "total"]).unwrap().len(),
            ctx.iter().unwrap().count()
        );
    }

    #[test]
    fn test_each_never_calls_back() {
        let criteria = Criteria::new("Order").where_eq("status", "nonexistent");
        let ctx = NullContext::new(&criteria);
        let mut calls = 0;
        let returned = ctx.each(|_| calls += 1).unwrap();
        assert_eq!(calls, 0);
        assert!(std::ptr::eq(returned, &ctx));
    }

    #[test]
    fn test_field_arguments_are_not_validated() {
        let criteria = Criteria::new("Order");
        let ctx = NullContext::new(&criteria);
        for field in ["", "$where", "no such field", "status"] {
            assert!(ctx.distinct(field).unwrap().is_empty());
            assert!(ctx.pluck(&[field]).unwrap().is_empty());
            assert!(ctx.tally(field).unwrap().is_empty());
        }
        assert!(ctx.pluck(&[]).unwrap().is_empty());
        assert_eq!(ctx.pick(&[]).unwrap(), None);
    }

    #[test]
    fn test_aggregates() {
        let criteria = Criteria::new("Order");
        let ctx = NullContext::new(&criteria);
        assert_eq!(ctx.sum("total").unwrap(), Value::Integer(0));
        assert_eq!(ctx.avg("total").unwrap(), None);
        assert_eq!(ctx.min("total").unwrap(), None);
        assert_eq!(ctx.max("total").unwrap(), None);
        assert!(ctx.take(10).unwrap().is_empty());
    }

    #[test]
    fn test_equality_ignores_criteria() {
        let orders = Criteria::new("Order").where_eq("status", "open");
        let customers = Criteria::new("Customer").filter(Expression::gt("age", 30));
        let a = NullContext::new(&orders);
        let b = NullContext::new(&customers);
        assert!(a.equals(&b));
        assert!(b.equals(&a));
        assert_eq!(a, b);
    }
}
