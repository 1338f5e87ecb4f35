//! Projections and aggregates computed from a stream of documents.
//!
//! These back the derived operations of [`Context`](crate::Context) so that
//! every variant answers them from its own iteration.

use quarry_core::{Document, Value};

/// Distinct values of `field` in first-seen order. Documents without the
/// field are skipped; an explicit `Null` counts as a value.
pub fn distinct<I>(docs: I, field: &str) -> Vec<Value>
where
    I: IntoIterator<Item = Document>,
{
    let mut seen: Vec<Value> = Vec::new();
    for doc in docs {
        if let Some(value) = doc.get(field) {
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
    }
    seen
}

/// One row per document, with `Null` standing in for missing fields
pub fn pluck<I>(docs: I, fields: &[&str]) -> Vec<Vec<Value>>
where
    I: IntoIterator<Item = Document>,
{
    docs.into_iter()
        .map(|doc| {
            fields
                .iter()
                .map(|field| doc.get(field).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect()
}

/// Occurrence count per value of `field`, in first-seen order
pub fn tally<I>(docs: I, field: &str) -> Vec<(Value, usize)>
where
    I: IntoIterator<Item = Document>,
{
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for doc in docs {
        let value = doc.get(field).cloned().unwrap_or(Value::Null);
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}

/// Sum of the numeric values of `field`.
///
/// Stays an `Integer` until a float is seen or the integer sum overflows.
/// Non-numeric values are ignored, and an empty input sums to `Integer(0)`.
pub fn sum<I>(docs: I, field: &str) -> Value
where
    I: IntoIterator<Item = Document>,
{
    let mut int_sum: Option<i64> = Some(0);
    let mut float_sum = 0.0f64;

    for doc in docs {
        match doc.get(field) {
            Some(Value::Integer(i)) => {
                int_sum = int_sum.and_then(|s| s.checked_add(*i));
                float_sum += *i as f64;
            }
            Some(Value::Float(f)) => {
                int_sum = None;
                float_sum += f;
            }
            _ => {}
        }
    }

    match int_sum {
        Some(total) => Value::Integer(total),
        None => Value::Float(float_sum),
    }
}

/// Mean of the numeric values of `field`, if there are any
pub fn avg<I>(docs: I, field: &str) -> Option<Value>
where
    I: IntoIterator<Item = Document>,
{
    let (total, count) = docs
        .into_iter()
        .filter_map(|doc| doc.get(field).and_then(Value::as_f64))
        .fold((0.0, 0usize), |(total, count), v| (total + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(Value::Float(total / count as f64))
    }
}

/// Smallest non-null value of `field`
pub fn min<I>(docs: I, field: &str) -> Option<Value>
where
    I: IntoIterator<Item = Document>,
{
    docs.into_iter()
        .filter_map(|doc| doc.get(field).filter(|v| **v != Value::Null).cloned())
        .min_by(|a, b| a.sort_cmp(b))
}

/// Largest non-null value of `field`
pub fn max<I>(docs: I, field: &str) -> Option<Value>
where
    I: IntoIterator<Item = Document>,
{
    docs.into_iter()
        .filter_map(|doc| doc.get(field).filter(|v| **v != Value::Null).cloned())
        .max_by(|a, b| a.sort_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> Vec<Document> {
        vec![
            Document::new().with("status", "open").with("total", 10),
            Document::new().with("status", "paid").with("total", 5),
            Document::new().with("status", "open").with("total", 7),
            Document::new().with("status", Value::Null),
        ]
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        assert_eq!(
            distinct(orders(), "status"),
            vec![Value::from("open"), Value::from("paid"), Value::Null]
        );
        assert_eq!(distinct(orders(), "total").len(), 3);
        assert!(distinct(orders(), "missing").is_empty());
    }

    #[test]
    fn test_pluck_fills_missing_with_null() {
        let rows = pluck(orders(), &["total", "status"]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec![Value::Integer(10), Value::from("open")]);
        assert_eq!(rows[3], vec![Value::Null, Value::Null]);
    }

    #[test]
    fn test_tally() {
        let counts = tally(orders(), "status");
        assert_eq!(
            counts,
            vec![
                (Value::from("open"), 2),
                (Value::from("paid"), 1),
                (Value::Null, 1),
            ]
        );
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(orders(), "total"), Value::Integer(22));
        assert_eq!(sum(Vec::<Document>::new(), "total"), Value::Integer(0));

        let mixed = vec![
            Document::new().with("total", 1),
            Document::new().with("total", 0.5),
        ];
        assert_eq!(sum(mixed, "total"), Value::Float(1.5));

        let overflow = vec![
            Document::new().with("total", i64::MAX),
            Document::new().with("total", 1),
        ];
        assert!(matches!(sum(overflow, "total"), Value::Float(_)));
    }

    #[test]
    fn test_avg_min_max() {
        assert_eq!(avg(orders(), "total"), Some(Value::Float(22.0 / 3.0)));
        assert_eq!(min(orders(), "total"), Some(Value::Integer(5)));
        assert_eq!(max(orders(), "total"), Some(Value::Integer(10)));
        assert_eq!(max(orders(), "status"), Some(Value::from("paid")));
        assert_eq!(avg(Vec::<Document>::new(), "total"), None);
        assert_eq!(min(Vec::<Document>::new(), "total"), None);
    }
}
