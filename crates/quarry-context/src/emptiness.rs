/// Static emptiness analysis
///
/// Decides, without reading a store, whether a criteria can never match a
/// document. The analysis is sound but incomplete: it only answers "empty"
/// when evaluating the filter against any document would be false.
use quarry_core::eval;
use quarry_core::{CompareOp, Criteria, Document, Expression, LogicalOp, Value};
use std::fmt;

/// Why a criteria was proven empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Explicitly marked with `none()`, or scoped to a missing parent
    Unsatisfiable,
    /// `limit(0)`
    ZeroLimit,
    /// The filter can never be true
    ContradictoryPredicate,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::Unsatisfiable => write!(f, "unsatisfiable"),
            EmptyReason::ZeroLimit => write!(f, "zero limit"),
            EmptyReason::ContradictoryPredicate => write!(f, "contradictory predicate"),
        }
    }
}

/// Returns the first reason `criteria` is provably empty, if any.
///
/// Predicate analysis only runs when `analyze_predicates` is set; the
/// explicit markers are always honored.
pub fn analyze(criteria: &Criteria, analyze_predicates: bool) -> Option<EmptyReason> {
    if criteria.is_marked_none() {
        return Some(EmptyReason::Unsatisfiable);
    }
    if criteria.limit_count() == Some(0) {
        return Some(EmptyReason::ZeroLimit);
    }
    if analyze_predicates && criteria.filter_expr().is_some_and(is_unsatisfiable) {
        return Some(EmptyReason::ContradictoryPredicate);
    }
    None
}

/// Whether `expr` is false for every document
pub fn is_unsatisfiable(expr: &Expression) -> bool {
    match expr {
        Expression::Literal(value) => *value == Value::Boolean(false),
        Expression::Not(inner) => is_tautology(inner),
        Expression::In { values, .. } => values.is_empty(),
        Expression::Between { min, max, .. } => match (min.as_ref(), max.as_ref()) {
            (Expression::Literal(lo), Expression::Literal(hi)) => {
                lo.compare(hi, &CompareOp::Gt)
            }
            _ => false,
        },
        Expression::Compare { left, right, .. } => {
            is_constant(left) && is_constant(right) && !eval::matches(&Document::new(), expr)
        }
        Expression::Logical {
            left,
            op: LogicalOp::Or,
            right,
        } => is_unsatisfiable(left) && is_unsatisfiable(right),
        Expression::Logical {
            op: LogicalOp::And, ..
        } => {
            let mut conjuncts = Vec::new();
            collect_conjuncts(expr, &mut conjuncts);
            conjuncts.iter().any(|c| is_unsatisfiable(c)) || has_conflicting_equalities(&conjuncts)
        }
        Expression::Field(_) | Expression::Like { .. } => false,
    }
}

/// Whether `expr` is true for every document. Only literal `true` and
/// document-independent comparisons qualify.
fn is_tautology(expr: &Expression) -> bool {
    match expr {
        Expression::Literal(value) => *value != Value::Boolean(false),
        Expression::Compare { left, right, .. } => {
            is_constant(left) && is_constant(right) && eval::matches(&Document::new(), expr)
        }
        Expression::Not(inner) => is_unsatisfiable(inner),
        _ => false,
    }
}

fn is_constant(expr: &Expression) -> bool {
    matches!(expr, Expression::Literal(_))
}

fn collect_conjuncts<'e>(expr: &'e Expression, out: &mut Vec<&'e Expression>) {
    match expr {
        Expression::Logical {
            left,
            op: LogicalOp::And,
            right,
        } => {
            collect_conjuncts(left, out);
            collect_conjuncts(right, out);
        }
        other => out.push(other),
    }
}

/// `field = a AND field = b` with `a != b`.
///
/// A document value only compares equal to literals of its own type, so two
/// different literals can never both match. Float pairs are skipped because
/// float equality is tolerance-based.
fn has_conflicting_equalities(conjuncts: &[&Expression]) -> bool {
    let equalities: Vec<(&str, &Value)> = conjuncts.iter().filter_map(|c| equality(c)).collect();

    equalities.iter().enumerate().any(|(i, (field, a))| {
        equalities[i + 1..].iter().any(|(other, b)| {
            field == other
                && a != b
                && !matches!((a, b), (Value::Float(_), Value::Float(_)))
        })
    })
}

fn equality(expr: &Expression) -> Option<(&str, &Value)> {
    match expr {
        Expression::Compare {
            left,
            op: CompareOp::Eq,
            right,
        } => match (left.as_ref(), right.as_ref()) {
            (Expression::Field(field), Expression::Literal(value))
            | (Expression::Literal(value), Expression::Field(field)) => {
                Some((field.as_str(), value))
            }
            _ => None,
        },
        _ => None,
    }
}
