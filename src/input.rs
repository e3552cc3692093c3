//! Input parsing: normalizes a caller record against a table's column
//! dictionary before scanning. The caller's record is never mutated; the
//! per-query hash is a deep copy with the `set*` defaults applied.

use std::collections::HashMap;

use crate::types::{DefaultFn, DefaultGate, Record, Table, Value};

/// A query-ready input: the working hash, the values fetched per input
/// column, and the index key tuple when the table is indexed.
#[derive(Debug)]
pub(crate) struct ParsedInput {
    pub(crate) hash: Record,
    pub(crate) scan_cols: HashMap<usize, Value>,
    pub(crate) key: Option<Vec<String>>,
}

pub(crate) fn parse(table: &Table, input: &Record) -> ParsedInput {
    let mut hash = input.clone();

    // Defaults run in column order; each sees the hash as left by earlier
    // entries.
    for entry in &table.columns.defaults {
        let applies = match entry.gate {
            DefaultGate::Always => true,
            DefaultGate::IfNil => hash.fetch(&entry.name) == Value::Nil,
            DefaultGate::IfBlank => hash.fetch(&entry.name).is_blank(),
        };
        if applies {
            let value = match &entry.function {
                DefaultFn::Constant(v) => v.clone(),
                DefaultFn::Proc(p) => (p.eval)(&hash),
            };
            hash.insert(&entry.name, value);
        }
    }

    let mut scan_cols = HashMap::new();
    for (&col, entry) in &table.columns.ins {
        if let Some(name) = &entry.name
            && let Some(value) = hash.get(name)
        {
            scan_cols.insert(col, value.clone());
        }
    }

    let key = table.index.as_ref().map(|index| {
        index
            .key_columns
            .iter()
            .map(|col| {
                scan_cols
                    .get(col)
                    .and_then(Value::as_text)
                    .unwrap_or_default()
            })
            .collect()
    });

    ParsedInput {
        hash,
        scan_cols,
        key,
    }
}
