//! Query criteria.
//!
//! A [`Criteria`] is an immutable description of a document query: the
//! target entity type, an optional filter predicate, projection, sort and
//! skip/limit. It is built with consuming builder methods and then handed to
//! a context by reference.

use crate::expression::Expression;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest first
    Asc,
    /// Largest first
    Desc,
}

/// A field to sort by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    /// Field to compare
    pub field: String,
    /// Sort direction
    pub direction: Direction,
}

/// A complete document query description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    entity: String,
    filter: Option<Expression>,
    projection: Option<Vec<String>>,
    sort: Vec<SortKey>,
    skip: usize,
    limit: Option<usize>,
    unsatisfiable: bool,
}

impl Criteria {
    /// Creates criteria matching every document of `entity`
    pub fn new(entity: impl Into<String>) -> Self {
        Criteria {
            entity: entity.into(),
            filter: None,
            projection: None,
            sort: Vec::new(),
            skip: 0,
            limit: None,
            unsatisfiable: false,
        }
    }

    /// Adds a filter, AND-combined with any filter already present
    pub fn filter(mut self, condition: Expression) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    /// Shorthand for `filter(Expression::eq(field, value))`
    pub fn where_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(Expression::eq(field, value))
    }

    /// Restricts returned documents to the listed fields
    pub fn only<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a sort key
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.sort.push(SortKey {
            field: field.to_string(),
            direction,
        });
        self
    }

    /// Skips the first `count` matching documents
    pub fn skip(mut self, count: usize) -> Self {
        self.skip = count;
        self
    }

    /// Caps the number of matching documents
    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Marks the criteria as matching nothing.
    ///
    /// Resolution turns such criteria into a null context without consulting
    /// the store.
    pub fn none(mut self) -> Self {
        self.unsatisfiable = true;
        self
    }

    /// Scopes the criteria to the children of a parent document.
    ///
    /// When the parent key is missing (the parent was never saved, or the
    /// reference is unset) no child can match and the criteria is marked
    /// unsatisfiable instead of filtering on a null key.
    pub fn for_parent(self, foreign_key: &str, parent_key: Option<Value>) -> Self {
        match parent_key {
            Some(Value::Null) | None => self.none(),
            Some(key) => self.where_eq(foreign_key, key),
        }
    }

    /// The target entity type
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// The filter predicate, if any
    pub fn filter_expr(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    /// The projected fields, if restricted
    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    /// Sort keys in priority order
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort
    }

    /// Number of matching documents to skip
    pub fn skip_count(&self) -> usize {
        self.skip
    }

    /// Maximum number of documents, if capped
    pub fn limit_count(&self) -> Option<usize> {
        self.limit
    }

    /// Whether [`Criteria::none`] was applied
    pub fn is_marked_none(&self) -> bool {
        self.unsatisfiable
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FIND {}", self.entity)?;
        if self.unsatisfiable {
            return write!(f, " NONE");
        }
        if let Some(ref filter) = self.filter {
            write!(f, " WHERE {}", filter)?;
        }
        if let Some(ref fields) = self.projection {
            write!(f, " ONLY {}", fields.join(", "))?;
        }
        if !self.sort.is_empty() {
            write!(f, " ORDER BY ")?;
            for (i, key) in self.sort.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", key)?;
            }
        }
        if self.skip > 0 {
            write!(f, " SKIP {}", self.skip)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_are_and_combined() {
        let criteria = Criteria::new("Order")
            .where_eq("status", "open")
            .filter(Expression::gt("total", 10));
        assert_eq!(
            criteria.filter_expr(),
            Some(&Expression::eq("status", "open").and(Expression::gt("total", 10)))
        );
    }

    #[test]
    fn test_for_parent() {
        let scoped = Criteria::new("Order").for_parent("customer_id", Some(Value::Integer(7)));
        assert!(!scoped.is_marked_none());
        assert_eq!(
            scoped.filter_expr(),
            Some(&Expression::eq("customer_id", 7))
        );

        let orphan = Criteria::new("Order").for_parent("customer_id", None);
        assert!(orphan.is_marked_none());
        assert!(orphan.filter_expr().is_none());

        let null_key = Criteria::new("Order").for_parent("customer_id", Some(Value::Null));
        assert!(null_key.is_marked_none());
    }

    #[test]
    fn test_display() {
        let criteria = Criteria::new("Order")
            .where_eq("status", "open")
            .only(["id", "total"])
            .order_by("total", Direction::Desc)
            .skip(5)
            .limit(10);
        assert_eq!(
            criteria.to_string(),
            "FIND Order WHERE (status = 'open') ONLY id, total ORDER BY total DESC SKIP 5 LIMIT 10"
        );
        assert_eq!(Criteria::new("Order").none().to_string(), "FIND Order NONE");
    }

    #[test]
    fn test_serde_roundtrip() {
        let criteria = Criteria::new("Order")
            .filter(Expression::between("total", 10, 20))
            .limit(3);
        let json = serde_json::to_string(&criteria).unwrap();
        let back: Criteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
    }
}
