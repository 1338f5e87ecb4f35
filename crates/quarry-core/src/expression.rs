/// Predicate expression tree for criteria filters
///
/// Mirrors the boolean expressions a document query can carry: comparisons,
/// AND/OR/NOT, LIKE, IN and BETWEEN over fields and literal values.
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Boolean expression used as a criteria filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Field reference
    Field(String),
    /// Literal value
    Literal(Value),
    /// Comparison: field = value, field > value, etc.
    Compare {
        left: Box<Expression>,
        op: CompareOp,
        right: Box<Expression>,
    },
    /// Logical AND/OR
    Logical {
        left: Box<Expression>,
        op: LogicalOp,
        right: Box<Expression>,
    },
    /// NOT expression
    Not(Box<Expression>),
    /// LIKE pattern matching with `%` wildcards
    Like {
        expr: Box<Expression>,
        pattern: String,
    },
    /// IN (value1, value2, ...)
    In {
        expr: Box<Expression>,
        values: Vec<Value>,
    },
    /// BETWEEN min AND max (inclusive)
    Between {
        expr: Box<Expression>,
        min: Box<Expression>,
        max: Box<Expression>,
    },
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq, // =
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
}

impl CompareOp {
    /// Whether an ordering between two operands satisfies this operator
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

fn compare(field: &str, op: CompareOp, value: impl Into<Value>) -> Expression {
    Expression::Compare {
        left: Box::new(Expression::Field(field.to_string())),
        op,
        right: Box::new(Expression::Literal(value.into())),
    }
}

impl Expression {
    /// `field = value`
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Eq, value)
    }

    /// `field != value`
    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Ne, value)
    }

    /// `field < value`
    pub fn lt(field: &str, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Lt, value)
    }

    /// `field <= value`
    pub fn le(field: &str, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Le, value)
    }

    /// `field > value`
    pub fn gt(field: &str, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Gt, value)
    }

    /// `field >= value`
    pub fn ge(field: &str, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Ge, value)
    }

    /// `self AND other`
    pub fn and(self, other: Expression) -> Self {
        Expression::Logical {
            left: Box::new(self),
            op: LogicalOp::And,
            right: Box::new(other),
        }
    }

    /// `self OR other`
    pub fn or(self, other: Expression) -> Self {
        Expression::Logical {
            left: Box::new(self),
            op: LogicalOp::Or,
            right: Box::new(other),
        }
    }

    /// `NOT expr`
    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expression) -> Self {
        Expression::Not(Box::new(expr))
    }

    /// `field LIKE pattern`
    pub fn like(field: &str, pattern: &str) -> Self {
        Expression::Like {
            expr: Box::new(Expression::Field(field.to_string())),
            pattern: pattern.to_string(),
        }
    }

    /// `field IN (values...)`
    pub fn in_list<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expression::In {
            expr: Box::new(Expression::Field(field.to_string())),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `field BETWEEN min AND max`
    pub fn between(field: &str, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Expression::Between {
            expr: Box::new(Expression::Field(field.to_string())),
            min: Box::new(Expression::Literal(min.into())),
            max: Box::new(Expression::Literal(max.into())),
        }
    }

    /// A literal `true`/`false` predicate
    pub fn constant(value: bool) -> Self {
        Expression::Literal(Value::Boolean(value))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Field(name) => write!(f, "{}", name),
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Compare { left, op, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            Expression::Logical { left, op, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            Expression::Not(expr) => write!(f, "NOT ({})", expr),
            Expression::Like { expr, pattern } => write!(f, "{} LIKE '{}'", expr, pattern),
            Expression::In { expr, values } => {
                write!(f, "{} IN (", expr)?;
                for (i, val) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, ")")
            }
            Expression::Between { expr, min, max } => {
                write!(f, "{} BETWEEN {} AND {}", expr, min, max)
            }
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "="),
            CompareOp::Ne => write!(f, "!="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Le => write!(f, "<="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Ge => write!(f, ">="),
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}
