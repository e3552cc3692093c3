//! The decision driver: selects a scan strategy (paths, indexed, or
//! linear), walks candidate rows in order, assembles output attributes for
//! matching rows, and applies the first-match or accumulate termination
//! mode.

use crate::input::{self, ParsedInput};
use crate::types::{range_rows, CellValue, ColumnType, Record, RowRange, Table, Value};

pub(crate) fn decide(table: &Table, input: &Record) -> Record {
    if !table.paths.is_empty() {
        return decide_paths(table, input);
    }

    let parsed = input::parse(table, input);
    let ranges: Vec<RowRange> = match (&table.index, &parsed.key) {
        (Some(index), Some(key)) => match index.ranges(key) {
            Some(ranges) => ranges.to_vec(),
            None => return Record::new(),
        },
        _ => full_range(table),
    };

    let mut picked = Vec::new();
    if let Some(attrs) = scan(table, &parsed, &ranges, &mut picked) {
        return attrs;
    }
    finalize(table, picked)
}

/// Iterate path groups in declaration order, scanning each group against
/// the sub-record found at its path.
fn decide_paths(table: &Table, input: &Record) -> Record {
    let mut picked = Vec::new();

    for (path, ranges) in &table.paths {
        let Some(sub) = input.dig(path) else {
            continue;
        };
        let parsed = input::parse(table, sub);

        if table.options.first_match {
            let mut scratch = Vec::new();
            if let Some(attrs) = scan(table, &parsed, ranges, &mut scratch)
                && !attrs.is_empty()
            {
                // First non-empty group result wins.
                return attrs;
            }
        } else {
            let _ = scan(table, &parsed, ranges, &mut picked);
        }
    }

    if table.options.first_match {
        Record::new()
    } else {
        finalize(table, picked)
    }
}

/// Walk the candidate rows in range order, then row order. In first-match
/// mode returns the first accepted row's attributes; in accumulate mode
/// returns `None` and pushes every accepted row's attributes onto `picked`.
fn scan(
    table: &Table,
    parsed: &ParsedInput,
    ranges: &[RowRange],
    picked: &mut Vec<Record>,
) -> Option<Record> {
    for &range in ranges {
        for row in range_rows(range) {
            if !table.scan_rows[row].matches(&table.rows[row], &parsed.scan_cols, &parsed.hash) {
                continue;
            }
            // A row matched on inputs can still be rejected by its if: gates.
            let Some(attrs) = assemble_row(table, row, &parsed.hash) else {
                continue;
            };
            if table.options.first_match {
                return Some(attrs);
            }
            picked.push(attrs);
        }
    }
    None
}

/// Build one matching row's output attributes: constants, then output
/// functions over the input hash, then `if:` gates over the attributes
/// under construction. Returns `None` when a gate rejects the row.
fn assemble_row(table: &Table, row: usize, hash: &Record) -> Option<Record> {
    let outs = &table.outs_rows[row];
    let cells = &table.rows[row];
    let mut attrs = Record::new();

    for &col in &outs.constants {
        if let (CellValue::Constant(value), Some(name)) =
            (&cells[col], table.columns.outs[&col].name.as_deref())
        {
            attrs.insert(name, value.clone());
        }
    }

    for &col in &outs.procs {
        let entry = &table.columns.outs[&col];
        if entry.column_type == ColumnType::If {
            continue;
        }
        if let (CellValue::Outs(proc), Some(name)) = (&cells[col], entry.name.as_deref()) {
            attrs.insert(name, (proc.eval)(hash));
        }
    }

    for &col in &outs.procs {
        let entry = &table.columns.outs[&col];
        if entry.column_type != ColumnType::If {
            continue;
        }
        if let CellValue::Outs(proc) = &cells[col]
            && !(proc.eval)(&attrs).is_truthy()
        {
            return None;
        }
    }

    Some(attrs)
}

/// Merge accumulated rows: a single accepted row keeps its scalar
/// attributes; several become per-column sequences in pick order.
fn finalize(table: &Table, mut picked: Vec<Record>) -> Record {
    if picked.len() <= 1 {
        return picked.pop().unwrap_or_default();
    }

    let mut attrs = Record::new();
    for entry in table.columns.outs.values() {
        let Some(name) = entry.name.as_deref() else {
            continue;
        };
        let values: Vec<Value> = picked
            .iter_mut()
            .filter_map(|rec| rec.remove(name))
            .collect();
        if !values.is_empty() {
            attrs.insert(name, Value::List(values));
        }
    }
    attrs
}

fn full_range(table: &Table) -> Vec<RowRange> {
    if table.rows.is_empty() {
        Vec::new()
    } else {
        vec![(0, Some(table.rows.len() - 1))]
    }
}
