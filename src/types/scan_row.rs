use std::collections::HashMap;

use super::cell::CellValue;
use super::record::Record;
use super::value::Value;

/// Per-row classification of cells: which column positions hold constants
/// and which hold compiled predicates. A position in neither set is an empty
/// cell and matches unconditionally. The same shape serves input columns
/// (`scan_rows`) and output columns (`outs_rows`).
#[derive(Debug, Clone, Default)]
pub(crate) struct ScanRow {
    pub(crate) constants: Vec<usize>,
    pub(crate) procs: Vec<usize>,
    /// Path segments for rows of a path table; empty otherwise.
    pub(crate) path: Vec<String>,
}

impl ScanRow {
    /// Does this row match the given input?
    ///
    /// `cells` is the row's compiled cell vector, `scan_cols` maps column
    /// positions to the input values fetched for them, and `hash` is the
    /// full (already path-scoped) input record seen by guard predicates.
    pub(crate) fn matches(
        &self,
        cells: &[CellValue],
        scan_cols: &HashMap<usize, Value>,
        hash: &Record,
    ) -> bool {
        let nil = Value::Nil;

        for &col in &self.constants {
            let CellValue::Constant(expected) = &cells[col] else {
                debug_assert!(false, "constants set out of sync with row cells");
                return false;
            };
            let value = scan_cols.get(&col).unwrap_or(&nil);
            if !expected.matches_constant(value) {
                return false;
            }
        }

        for &col in &self.procs {
            let CellValue::Ins(proc) = &cells[col] else {
                debug_assert!(false, "procs set out of sync with row cells");
                return false;
            };
            let value = scan_cols.get(&col).unwrap_or(&nil);
            if !(proc.test)(value, hash) {
                return false;
            }
        }

        true
    }
}
