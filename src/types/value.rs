use std::cmp::Ordering;
use std::fmt;

use super::record::Record;

/// Comparison operators accepted in numeric, symbol, and guard cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Supported value types for table cells and input records.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or explicit `nil`.
    #[default]
    Nil,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A sequence of values (accumulate-mode output columns).
    List(Vec<Value>),
    /// A nested record (path-table sub-records).
    Map(Record),
}

impl Value {
    /// Compare this value to another using the given operator.
    /// Returns `None` for incompatible types or unsupported operations
    /// (anything involving lists or maps, mixed string/number pairs).
    #[must_use]
    pub fn compare(&self, op: Comparator, other: &Value) -> Option<bool> {
        let ord = self.partial_cmp_value(other)?;
        Some(match op {
            Comparator::Eq => ord == Ordering::Equal,
            Comparator::Neq => ord != Ordering::Equal,
            Comparator::Gt => ord == Ordering::Greater,
            Comparator::Gte => ord != Ordering::Less,
            Comparator::Lt => ord == Ordering::Less,
            Comparator::Lte => ord != Ordering::Greater,
        })
    }

    /// Plain equality as used for constant cells: `None` from
    /// [`compare`](Self::compare) counts as not equal.
    #[must_use]
    pub fn matches_constant(&self, other: &Value) -> bool {
        self.compare(Comparator::Eq, other) == Some(true)
    }

    #[allow(clippy::cast_precision_loss)]
    fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Nil, Value::Nil) => Some(Ordering::Equal),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            // Only equality comparisons are meaningful for bools
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    /// Numeric coercion: ints and floats directly, strings when they parse.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Everything is truthy except `Nil` and `false`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// `Nil` or a string that is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Canonical text rendering used for index keys and regexp matching.
    /// Lists and maps have no canonical text.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Nil => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Eq => write!(f, "=="),
            Comparator::Neq => write!(f, "!="),
            Comparator::Gt => write!(f, ">"),
            Comparator::Gte => write!(f, ">="),
            Comparator::Lt => write!(f, "<"),
            Comparator::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(rec) => write!(f, "{rec}"),
        }
    }
}
