use std::collections::BTreeMap;
use std::fmt;

use super::cell::OutsProc;
use super::error::ParseError;
use super::value::Value;

/// The role a header cell assigns to its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnType {
    In,
    Out,
    Guard,
    If,
    Set,
    SetNil,
    SetBlank,
    Path,
}

impl ColumnType {
    pub(crate) fn is_set(self) -> bool {
        matches!(
            self,
            ColumnType::Set | ColumnType::SetNil | ColumnType::SetBlank
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnType::In => "in",
            ColumnType::Out => "out",
            ColumnType::Guard => "guard",
            ColumnType::If => "if",
            ColumnType::Set => "set",
            ColumnType::SetNil => "set/nil",
            ColumnType::SetBlank => "set/blank",
            ColumnType::Path => "path",
        };
        write!(f, "{s}")
    }
}

/// One typed column of the table.
#[derive(Debug, Clone)]
pub(crate) struct ColumnEntry {
    /// `None` for anonymous columns (`guard:`, `if:`, `cond:`, `path:`).
    pub(crate) name: Option<String>,
    pub(crate) column_type: ColumnType,
    /// Column-level text-only override (`in/text`, `out/text`); `None`
    /// defers to the table option.
    pub(crate) text_only: Option<bool>,
    /// Starts true for `in` columns; cleared when any cell in the column is
    /// empty or compiles to a predicate, disqualifying it as an index key.
    pub(crate) indexed: bool,
}

impl ColumnEntry {
    pub(crate) fn effective_text_only(&self, table_default: bool) -> bool {
        self.text_only.unwrap_or(table_default)
    }
}

/// When a `set*` default applies to the incoming value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefaultGate {
    Always,
    IfNil,
    IfBlank,
}

/// The value a default assigns: a literal, or a function of the hash.
#[derive(Clone)]
pub(crate) enum DefaultFn {
    Constant(Value),
    Proc(OutsProc),
}

impl fmt::Debug for DefaultFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultFn::Constant(v) => write!(f, "Constant({v})"),
            DefaultFn::Proc(p) => write!(f, "Proc({:?})", p.kind),
        }
    }
}

/// A compiled `set*` column: assigns a default for `name` before scanning.
#[derive(Debug, Clone)]
pub(crate) struct DefaultEntry {
    pub(crate) name: String,
    pub(crate) function: DefaultFn,
    pub(crate) gate: DefaultGate,
}

/// The typed column dictionary, keyed by 0-based column position.
///
/// Input and output columns may interleave. `ins` names need not be unique
/// (several columns may test the same field); `outs` names must be.
#[derive(Debug, Clone, Default)]
pub(crate) struct Columns {
    pub(crate) ins: BTreeMap<usize, ColumnEntry>,
    pub(crate) outs: BTreeMap<usize, ColumnEntry>,
    pub(crate) paths: BTreeMap<usize, ColumnEntry>,
    pub(crate) sets: BTreeMap<usize, ColumnEntry>,
    /// Built from the first data row during compilation, in column order.
    pub(crate) defaults: Vec<DefaultEntry>,
}

impl Columns {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a column entry at its position, enforcing the dictionary
    /// invariants (unique output names).
    pub(crate) fn push(&mut self, col: usize, entry: ColumnEntry) -> Result<(), ParseError> {
        match entry.column_type {
            ColumnType::In | ColumnType::Guard => {
                self.ins.insert(col, entry);
            }
            ColumnType::Out | ColumnType::If => {
                if let Some(name) = &entry.name
                    && self
                        .outs
                        .values()
                        .any(|e| e.name.as_deref() == Some(name.as_str()))
                {
                    return Err(ParseError::DuplicateOutputName { name: name.clone() });
                }
                self.outs.insert(col, entry);
            }
            ColumnType::Path => {
                self.paths.insert(col, entry);
            }
            ColumnType::Set | ColumnType::SetNil | ColumnType::SetBlank => {
                self.sets.insert(col, entry);
            }
        }
        Ok(())
    }

    /// Whether any column partitions rows by path.
    pub(crate) fn has_paths(&self) -> bool {
        !self.paths.is_empty()
    }
}
