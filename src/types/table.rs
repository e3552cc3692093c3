use std::fmt;
use std::path::Path;

use crate::matchers::Matcher;

use super::cell::CellValue;
use super::columns::Columns;
use super::index::{Index, RowRange};
use super::record::Record;
use super::scan_row::ScanRow;

/// Table-level options accepted by [`Table::parse`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Stop after the first matching row (`true`), or accumulate every
    /// matching row (`false`).
    pub first_match: bool,
    /// Permit regexp cells to omit the `=~` comparator.
    pub regexp_implicit: bool,
    /// Disable all matchers; every non-empty cell is a literal string.
    pub text_only: bool,
    /// Override the matcher list and order. `None` uses the default list;
    /// `Some(vec![])` disables matchers entirely (equivalent to
    /// `text_only`).
    pub matchers: Option<Vec<Matcher>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            first_match: true,
            regexp_implicit: false,
            text_only: false,
            matchers: None,
        }
    }
}

impl Options {
    /// The matcher list in effect for this table.
    pub(crate) fn effective_matchers(&self) -> &[Matcher] {
        if self.text_only {
            return &[];
        }
        match &self.matchers {
            Some(list) => list,
            None => Matcher::DEFAULT,
        }
    }
}

/// A compiled, immutable decision table. Thread-safe and designed to live
/// behind `Arc`: any number of concurrent callers may [`decide`](Self::decide)
/// against it without synchronization.
#[derive(Debug)]
pub struct Table {
    /// Compiled cells, one vector per data row.
    pub(crate) rows: Vec<Vec<CellValue>>,
    pub(crate) columns: Columns,
    /// Input-column partition per row.
    pub(crate) scan_rows: Vec<ScanRow>,
    /// Output-column partition per row.
    pub(crate) outs_rows: Vec<ScanRow>,
    pub(crate) options: Options,
    pub(crate) index: Option<Index>,
    /// Path groups in declaration order; empty for non-path tables.
    pub(crate) paths: Vec<(Vec<String>, Vec<RowRange>)>,
    /// True iff any output cell compiled to a function.
    pub(crate) outs_functions: bool,
}

impl Table {
    /// Compile a two-dimensional grid of strings into a decision table.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) if any header cell, data cell, or
    /// option fails validation. No partial table is ever returned.
    pub fn parse(grid: Vec<Vec<String>>, options: Options) -> Result<Self, crate::Error> {
        Ok(crate::parse::table(grid, options)?)
    }

    /// Tokenize CSV text and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) on CSV or compilation failure.
    pub fn from_csv(text: &str, options: Options) -> Result<Self, crate::Error> {
        crate::parse::from_csv(text, options)
    }

    /// Read a CSV file and compile it. Any failure is wrapped with the file
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`](crate::Error::File) wrapping the underlying
    /// I/O, CSV, or compilation failure.
    pub fn from_file(path: impl AsRef<Path>, options: Options) -> Result<Self, crate::Error> {
        crate::parse::from_file(path.as_ref(), options)
    }

    /// Evaluate this table against an input record.
    ///
    /// Returns the output mapping assembled from the matching row(s), or an
    /// empty record when nothing matches. Never fails: missing input fields
    /// are treated as nil.
    #[must_use]
    pub fn decide(&self, input: &Record) -> Record {
        crate::evaluate::decide(self, input)
    }

    /// The number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table built a constant-key index.
    #[must_use]
    pub fn indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Whether any output cell compiled to a function rather than a
    /// constant.
    #[must_use]
    pub fn has_output_functions(&self) -> bool {
        self.outs_functions
    }

    /// Names of the named input columns, in column order.
    #[must_use]
    pub fn input_columns(&self) -> Vec<&str> {
        self.columns
            .ins
            .values()
            .filter_map(|e| e.name.as_deref())
            .collect()
    }

    /// Names of the named output columns, in column order.
    #[must_use]
    pub fn output_columns(&self) -> Vec<&str> {
        self.columns
            .outs
            .values()
            .filter_map(|e| e.name.as_deref())
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Table({} rows, {} in, {} out{}{})",
            self.rows.len(),
            self.columns.ins.len(),
            self.columns.outs.len(),
            if self.index.is_some() { ", indexed" } else { "" },
            if self.paths.is_empty() { "" } else { ", paths" },
        )
    }
}
