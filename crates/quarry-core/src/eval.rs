/// Predicate evaluation and ordering over documents
///
/// Used by store-backed contexts to run a criteria filter in process.
use crate::criteria::{Direction, SortKey};
use crate::document::Document;
use crate::expression::{CompareOp, Expression, LogicalOp};
use crate::value::Value;
use std::cmp::Ordering;

/// Returns `true` if `doc` satisfies `condition`.
///
/// Comparisons against a missing field are false, so `NOT` of such a
/// comparison is true.
pub fn matches(doc: &Document, condition: &Expression) -> bool {
    match condition {
        // A bare field is truthy when present
        Expression::Field(name) => doc.contains(name),
        Expression::Literal(value) => !matches!(value, Value::Boolean(false)),
        Expression::Compare { left, op, right } => {
            match (evaluate(doc, left), evaluate(doc, right)) {
                (Some(l), Some(r)) => l.compare(r, op),
                _ => false,
            }
        }
        Expression::Logical { left, op, right } => match op {
            LogicalOp::And => matches(doc, left) && matches(doc, right),
            LogicalOp::Or => matches(doc, left) || matches(doc, right),
        },
        Expression::Not(expr) => !matches(doc, expr),
        Expression::Like { expr, pattern } => match evaluate(doc, expr) {
            Some(Value::String(s)) => like(s, pattern),
            _ => false,
        },
        Expression::In { expr, values } => {
            evaluate(doc, expr)
                .is_some_and(|val| values.iter().any(|v| val.compare(v, &CompareOp::Eq)))
        }
        Expression::Between { expr, min, max } => {
            match (evaluate(doc, expr), evaluate(doc, min), evaluate(doc, max)) {
                (Some(val), Some(min_v), Some(max_v)) => {
                    val.compare(min_v, &CompareOp::Ge) && val.compare(max_v, &CompareOp::Le)
                }
                _ => false,
            }
        }
    }
}

fn evaluate<'a>(doc: &'a Document, expr: &'a Expression) -> Option<&'a Value> {
    match expr {
        Expression::Field(name) => doc.get(name),
        Expression::Literal(value) => Some(value),
        _ => None,
    }
}

/// SQL-style LIKE where `%` matches any run of characters
pub fn like(text: &str, pattern: &str) -> bool {
    let parts: Vec<&str> = pattern.split('%').collect();
    if parts.len() == 1 {
        return text == pattern;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    if text.len() < first.len() + last.len() || !text.starts_with(first) || !text.ends_with(last)
    {
        return false;
    }

    let mut rest = &text[first.len()..text.len() - last.len()];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    true
}

/// Orders two documents by a list of sort keys.
///
/// Documents missing a sort field order before those that have it, the same
/// place an explicit `Null` sorts.
pub fn compare_documents(a: &Document, b: &Document, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = match (a.get(&key.field), b.get(&key.field)) {
            (Some(a), Some(b)) => a.sort_cmp(b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };

        let ordering = match key.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: &str, total: i64) -> Document {
        Document::new().with("status", status).with("total", total)
    }

    #[test]
    fn test_compare_and_logic() {
        let doc = order("open", 30);
        assert!(matches(&doc, &Expression::eq("status", "open")));
        assert!(!matches(&doc, &Expression::eq("status", "closed")));
        assert!(matches(
            &doc,
            &Expression::eq("status", "open").and(Expression::ge("total", 30))
        ));
        assert!(matches(
            &doc,
            &Expression::eq("status", "closed").or(Expression::lt("total", 31))
        ));
    }

    #[test]
    fn test_missing_field() {
        let doc = order("open", 30);
        assert!(!matches(&doc, &Expression::eq("customer", 1)));
        assert!(matches(&doc, &Expression::not(Expression::eq("customer", 1))));
        assert!(!matches(&doc, &Expression::Field("customer".into())));
    }

    #[test]
    fn test_in_between_like() {
        let doc = order("pending-review", 15);
        assert!(matches(&doc, &Expression::in_list("total", [10, 15])));
        assert!(!matches(&doc, &Expression::in_list("total", Vec::<i64>::new())));
        assert!(matches(&doc, &Expression::between("total", 15, 20)));
        assert!(!matches(&doc, &Expression::between("total", 16, 20)));
        assert!(matches(&doc, &Expression::like("status", "pending%")));
        assert!(matches(&doc, &Expression::like("status", "%review")));
        assert!(matches(&doc, &Expression::like("status", "%ing-r%")));
        assert!(!matches(&doc, &Expression::like("status", "review%")));
    }

    #[test]
    fn test_in_matches_like_equality() {
        let stored = 0.1 + f64::EPSILON / 4.0;
        let doc = Document::new().with("rate", stored);
        assert!(matches(&doc, &Expression::eq("rate", 0.1)));
        assert!(matches(&doc, &Expression::in_list("rate", [0.1, 0.2])));
        assert!(!matches(&doc, &Expression::in_list("rate", [0.2])));

        let doc = Document::new().with("parent", Value::Null);
        assert!(matches(&doc, &Expression::in_list("parent", [Value::Null])));
    }

    #[test]
    fn test_like_edge_cases() {
        assert!(like("abc", "abc"));
        assert!(!like("abcd", "abc"));
        assert!(like("abc", "%"));
        assert!(like("", "%"));
        assert!(!like("ab", "ab%b"));
        assert!(like("abab", "ab%b"));
    }

    #[test]
    fn test_compare_documents() {
        let keys = vec![
            SortKey {
                field: "status".into(),
                direction: Direction::Asc,
            },
            SortKey {
                field: "total".into(),
                direction: Direction::Desc,
            },
        ];
        let mut docs = [order("b", 1), order("a", 1), order("a", 5), Document::new()];
        docs.sort_by(|a, b| compare_documents(a, b, &keys));
        assert_eq!(docs[0], Document::new());
        assert_eq!(docs[1], order("a", 5));
        assert_eq!(docs[2], order("a", 1));
        assert_eq!(docs[3], order("b", 1));
    }

    #[test]
    fn test_compare_documents_mixed_numbers_near_float_precision() {
        const P53: i64 = 1 << 53;
        let keys = vec![SortKey {
            field: "n".into(),
            direction: Direction::Asc,
        }];
        let mut docs = vec![
            Document::new().with("n", P53 + 1),
            Document::new().with("n", P53 as f64),
            Document::new().with("n", P53 - 1),
            Document::new().with("n", P53 + 2),
            Document::new().with("n", P53 as f64),
            Document::new().with("n", P53 - 2),
        ];
        docs.sort_by(|a, b| compare_documents(a, b, &keys));
        let sorted: Vec<Value> = docs.iter().filter_map(|d| d.get("n").cloned()).collect();
        assert_eq!(
            sorted,
            vec![
                Value::Integer(P53 - 2),
                Value::Integer(P53 - 1),
                Value::Float(P53 as f64),
                Value::Float(P53 as f64),
                Value::Integer(P53 + 1),
                Value::Integer(P53 + 2),
            ]
        );
    }
}
