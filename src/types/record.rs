use std::collections::HashMap;
use std::fmt;

use super::value::Value;

/// A string-keyed mapping of field names to [`Value`]s.
///
/// Records are both the input to [`Table::decide`](crate::Table::decide) and
/// its result. Dot-separated paths address nested records, which path tables
/// descend into: `set("user.age", 25)` creates an intermediate map at `user`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    data: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value at a dot-separated path. Creates intermediate nested maps
    /// as needed.
    #[must_use]
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Insert a value at a dot-separated path (mutable reference version).
    pub fn insert(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        Self::insert_recursive(&mut self.data, &segments, value);
    }

    /// Look up a value by dot-separated path.
    /// Returns `None` if the path does not exist.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments: Vec<&str> = path.split('.').collect();
        Self::get_recursive(&self.data, &segments)
    }

    /// Look up a field, treating a missing entry as [`Value::Nil`].
    #[must_use]
    pub fn fetch(&self, path: &str) -> Value {
        self.get(path).cloned().unwrap_or_default()
    }

    /// Descend along a sequence of keys, requiring a nested record at every
    /// step. Empty `segments` yields `self`.
    #[must_use]
    pub fn dig(&self, segments: &[String]) -> Option<&Record> {
        let mut current = self;
        for segment in segments {
            match current.data.get(segment) {
                Some(Value::Map(nested)) => current = nested,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Remove and return a top-level entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// The number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over top-level (name, value) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert_recursive(map: &mut HashMap<String, Value>, segments: &[&str], value: Value) {
        match segments {
            [] => {}
            [last] => {
                map.insert((*last).to_owned(), value);
            }
            [first, rest @ ..] => {
                let entry = map
                    .entry((*first).to_owned())
                    .or_insert_with(|| Value::Map(Record::new()));
                match entry {
                    Value::Map(nested) => {
                        Self::insert_recursive(&mut nested.data, rest, value);
                    }
                    other => {
                        let mut nested = Record::new();
                        Self::insert_recursive(&mut nested.data, rest, value);
                        *other = Value::Map(nested);
                    }
                }
            }
        }
    }

    fn get_recursive<'a>(map: &'a HashMap<String, Value>, segments: &[&str]) -> Option<&'a Value> {
        match segments {
            [] => None,
            [last] => map.get(*last),
            [first, rest @ ..] => match map.get(*first)? {
                Value::Map(nested) => Self::get_recursive(&nested.data, rest),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        write!(f, "{{")?;
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {}", self.data[*key])?;
        }
        write!(f, "}}")
    }
}
