//! Table compilation: runs the matcher dispatch over every data cell,
//! partitions each row into constants and predicates, validates
//! predicate-only columns, and builds the constant-key index or the path
//! groups.

use crate::matchers::{self, Role};
use crate::types::{
    CellValue, ColumnEntry, ColumnType, Columns, DefaultEntry, DefaultFn, DefaultGate, Index,
    Matched, Options, ParseError, RowRange, ScanRow, Table, Value,
};

pub(crate) fn compile(
    mut columns: Columns,
    rows: Vec<Vec<String>>,
    options: Options,
) -> Result<Table, ParseError> {
    parse_defaults(&mut columns, rows.first(), &options)?;

    let mut compiled_rows: Vec<Vec<CellValue>> = Vec::with_capacity(rows.len());
    let mut scan_rows: Vec<ScanRow> = Vec::with_capacity(rows.len());
    let mut outs_rows: Vec<ScanRow> = Vec::with_capacity(rows.len());
    let mut outs_functions = false;

    for row in &rows {
        let mut cells = vec![CellValue::Empty; row.len()];
        let mut scan = ScanRow::default();
        let mut outs = ScanRow::default();

        for (&col, entry) in columns.ins.iter_mut() {
            compile_ins_cell(&row[col], col, entry, &options, &mut cells, &mut scan)?;
        }
        for (&col, entry) in &columns.outs {
            compile_outs_cell(&row[col], col, entry, &options, &mut cells, &mut outs)?;
        }
        for &col in columns.paths.keys() {
            let text = row[col].as_str();
            if !text.is_empty() {
                scan.path.extend(text.split('.').map(str::to_owned));
            }
        }

        outs_functions |= !outs.procs.is_empty();
        compiled_rows.push(cells);
        scan_rows.push(scan);
        outs_rows.push(outs);
    }

    let (index, paths) = if columns.has_paths() {
        (None, build_paths(&scan_rows))
    } else {
        (build_index(&columns, &compiled_rows), Vec::new())
    };

    Ok(Table {
        rows: compiled_rows,
        columns,
        scan_rows,
        outs_rows,
        options,
        index,
        paths,
        outs_functions,
    })
}

fn compile_ins_cell(
    text: &str,
    col: usize,
    entry: &mut ColumnEntry,
    options: &Options,
    cells: &mut [CellValue],
    scan: &mut ScanRow,
) -> Result<(), ParseError> {
    if text.is_empty() {
        // Wildcard: matches anything, and disqualifies the column as an
        // index key.
        entry.indexed = false;
        return Ok(());
    }

    if entry.effective_text_only(options.text_only) {
        require_named(entry, text)?;
        cells[col] = CellValue::Constant(Value::String(text.to_owned()));
        scan.constants.push(col);
        return Ok(());
    }

    match matchers::dispatch(text, Role::Ins, options)? {
        Some(Matched::Constant(value)) => {
            require_named(entry, text)?;
            cells[col] = CellValue::Constant(value);
            scan.constants.push(col);
        }
        Some(Matched::Ins(proc)) => {
            entry.indexed = false;
            cells[col] = CellValue::Ins(proc);
            scan.procs.push(col);
        }
        Some(Matched::Outs(_)) => {
            return Err(ParseError::Internal {
                message: format!("output function compiled for input cell '{text}'"),
            });
        }
        None => {
            require_named(entry, text)?;
            cells[col] = CellValue::Constant(Value::String(text.to_owned()));
            scan.constants.push(col);
        }
    }
    Ok(())
}

fn compile_outs_cell(
    text: &str,
    col: usize,
    entry: &ColumnEntry,
    options: &Options,
    cells: &mut [CellValue],
    outs: &mut ScanRow,
) -> Result<(), ParseError> {
    if text.is_empty() {
        return Ok(());
    }

    if entry.effective_text_only(options.text_only) {
        require_predicate_free_ok(entry, text)?;
        cells[col] = CellValue::Constant(Value::String(text.to_owned()));
        outs.constants.push(col);
        return Ok(());
    }

    match matchers::dispatch(text, Role::Outs, options)? {
        Some(Matched::Constant(value)) => {
            require_predicate_free_ok(entry, text)?;
            cells[col] = CellValue::Constant(value);
            outs.constants.push(col);
        }
        Some(Matched::Outs(proc)) => {
            cells[col] = CellValue::Outs(proc);
            outs.procs.push(col);
        }
        Some(Matched::Ins(_)) => {
            return Err(ParseError::Internal {
                message: format!("input predicate compiled for output cell '{text}'"),
            });
        }
        None => {
            require_predicate_free_ok(entry, text)?;
            cells[col] = CellValue::Constant(Value::String(text.to_owned()));
            outs.constants.push(col);
        }
    }
    Ok(())
}

/// Constants are only comparable in named input columns: a `guard:` cell or
/// an anonymous `cond:` cell has no field to compare against.
fn require_named(entry: &ColumnEntry, text: &str) -> Result<(), ParseError> {
    if entry.column_type == ColumnType::Guard {
        return Err(ParseError::ConstantNotAllowed {
            cell: text.to_owned(),
            column: "guard".to_owned(),
        });
    }
    if entry.name.is_none() {
        return Err(ParseError::ConstantNotAllowed {
            cell: text.to_owned(),
            column: "anonymous in".to_owned(),
        });
    }
    Ok(())
}

/// `if:` columns gate rows and accept only predicates.
fn require_predicate_free_ok(entry: &ColumnEntry, text: &str) -> Result<(), ParseError> {
    if entry.column_type == ColumnType::If {
        return Err(ParseError::ConstantNotAllowed {
            cell: text.to_owned(),
            column: "if".to_owned(),
        });
    }
    Ok(())
}

/// The `set*` defaults come from the first data row's cells.
fn parse_defaults(
    columns: &mut Columns,
    first_row: Option<&Vec<String>>,
    options: &Options,
) -> Result<(), ParseError> {
    let Some(row) = first_row else {
        return Ok(());
    };

    let mut defaults = Vec::new();
    for (&col, entry) in &columns.sets {
        let text = row[col].as_str();
        if text.is_empty() {
            continue;
        }
        let Some(name) = entry.name.clone() else {
            return Err(ParseError::Internal {
                message: format!("unnamed set column at position {col}"),
            });
        };

        let function = match matchers::dispatch(text, Role::Outs, options)? {
            Some(Matched::Constant(value)) => DefaultFn::Constant(value),
            Some(Matched::Outs(proc)) => DefaultFn::Proc(proc),
            Some(Matched::Ins(_)) => {
                return Err(ParseError::Internal {
                    message: format!("input predicate compiled for default cell '{text}'"),
                });
            }
            None => DefaultFn::Constant(Value::String(text.to_owned())),
        };

        let gate = match entry.column_type {
            ColumnType::Set => DefaultGate::Always,
            ColumnType::SetNil => DefaultGate::IfNil,
            ColumnType::SetBlank => DefaultGate::IfBlank,
            other => {
                return Err(ParseError::Internal {
                    message: format!("column type '{other}' is not a set column"),
                });
            }
        };

        defaults.push(DefaultEntry {
            name,
            function,
            gate,
        });
    }

    columns.defaults = defaults;
    Ok(())
}

/// Key columns are the `in` columns whose every cell stayed constant across
/// all rows.
fn build_index(columns: &Columns, rows: &[Vec<CellValue>]) -> Option<Index> {
    let key_columns: Vec<usize> = columns
        .ins
        .iter()
        .filter(|(_, e)| e.column_type == ColumnType::In && e.indexed)
        .map(|(&col, _)| col)
        .collect();

    if key_columns.is_empty() || rows.is_empty() {
        return None;
    }

    let row_keys = rows
        .iter()
        .map(|cells| {
            key_columns
                .iter()
                .map(|&col| match &cells[col] {
                    CellValue::Constant(value) => value.as_text().unwrap_or_default(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();

    Some(Index::build(key_columns, row_keys))
}

/// Group contiguous rows sharing a path into ranges, keyed by path in
/// declaration order.
fn build_paths(scan_rows: &[ScanRow]) -> Vec<(Vec<String>, Vec<RowRange>)> {
    let mut groups: Vec<(Vec<String>, Vec<RowRange>)> = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    fn close(
        groups: &mut Vec<(Vec<String>, Vec<RowRange>)>,
        path: &[String],
        start: usize,
        last: usize,
    ) {
        let range = if start == last {
            (start, None)
        } else {
            (start, Some(last))
        };
        match groups.iter_mut().find(|(p, _)| p == path) {
            Some((_, ranges)) => ranges.push(range),
            None => groups.push((path.to_vec(), vec![range])),
        }
    }

    for (row, scan) in scan_rows.iter().enumerate() {
        match run {
            Some((start, last)) if scan_rows[start].path == scan.path => {
                run = Some((start, last + 1));
            }
            Some((start, last)) => {
                close(&mut groups, &scan_rows[start].path, start, last);
                run = Some((row, row));
            }
            None => run = Some((row, row)),
        }
    }
    if let Some((start, last)) = run {
        close(&mut groups, &scan_rows[start].path, start, last);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Table;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| (*s).to_owned()).collect())
            .collect()
    }

    fn compile_table(rows: &[&[&str]]) -> Table {
        crate::parse::table(grid(rows), Options::default()).unwrap()
    }

    #[test]
    fn rows_partition_into_constants_and_procs() {
        let table = compile_table(&[
            &["in:country", "in:age", "out:rate"],
            &["JP", "> 18", "1"],
            &["US", "", "2"],
        ]);

        assert_eq!(table.scan_rows[0].constants, vec![0]);
        assert_eq!(table.scan_rows[0].procs, vec![1]);
        assert_eq!(table.scan_rows[1].constants, vec![0]);
        assert!(table.scan_rows[1].procs.is_empty());
        assert_eq!(table.outs_rows[0].constants, vec![2]);
    }

    #[test]
    fn index_built_over_all_constant_columns() {
        let table = compile_table(&[
            &["in:country", "in:age", "out:rate"],
            &["JP", "> 18", "1"],
            &["US", "> 21", "2"],
        ]);

        let index = table.index.as_ref().unwrap();
        assert_eq!(index.key_columns, vec![0]);
        assert_eq!(index.ranges(&["JP".to_owned()]), Some(&[(0, None)][..]));
    }

    #[test]
    fn empty_cell_disqualifies_index_column() {
        let table = compile_table(&[
            &["in:country", "out:rate"],
            &["JP", "1"],
            &["", "2"],
        ]);
        assert!(table.index.is_none());
    }

    #[test]
    fn typed_constants_unboxed() {
        let table = compile_table(&[&["in:x", "out:y"], &["1", "10"]]);
        assert!(matches!(
            table.rows[0][0],
            CellValue::Constant(Value::Int(1))
        ));
        assert!(matches!(
            table.rows[0][1],
            CellValue::Constant(Value::Int(10))
        ));
    }

    #[test]
    fn text_only_disables_typed_constants() {
        let table = crate::parse::table(
            grid(&[&["in:x", "out:y"], &["1", "10"]]),
            Options {
                text_only: true,
                ..Options::default()
            },
        )
        .unwrap();
        assert!(matches!(
            &table.rows[0][0],
            CellValue::Constant(Value::String(s)) if s == "1"
        ));
    }

    #[test]
    fn guard_constant_rejected() {
        let err = crate::parse::table(
            grid(&[&["in:x", "guard:"], &["1", "US"]]),
            Options::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::ConstantNotAllowed { column, .. } if column == "guard"
        ));
    }

    #[test]
    fn if_constant_rejected() {
        let err = crate::parse::table(
            grid(&[&["in:x", "out:y", "if:"], &["1", "10", "yes"]]),
            Options::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::ConstantNotAllowed { column, .. } if column == "if"
        ));
    }

    #[test]
    fn outs_functions_flag() {
        let plain = compile_table(&[&["in:x", "out:y"], &["1", "10"]]);
        assert!(!plain.outs_functions);

        let with_fn = compile_table(&[&["in:x", "out:y"], &["1", ":x"]]);
        assert!(with_fn.outs_functions);
    }

    #[test]
    fn defaults_from_first_row() {
        let table = compile_table(&[
            &["set/nil:country", "in:age", "out:rate"],
            &["US", "> 18", "1"],
            &["", "> 65", "2"],
        ]);

        assert_eq!(table.columns.defaults.len(), 1);
        let entry = &table.columns.defaults[0];
        assert_eq!(entry.name, "country");
        assert_eq!(entry.gate, DefaultGate::IfNil);
        assert!(matches!(
            &entry.function,
            DefaultFn::Constant(Value::String(s)) if s == "US"
        ));
        // Set columns do not participate in matching.
        assert!(table.scan_rows[0].constants.is_empty());
    }

    #[test]
    fn path_groups_in_declaration_order() {
        let table = compile_table(&[
            &["path:", "in:x", "out:y"],
            &["user", "1", "10"],
            &["user", "2", "20"],
            &["order", "1", "30"],
            &["user", "3", "40"],
        ]);

        assert!(table.index.is_none());
        assert_eq!(table.paths.len(), 2);
        assert_eq!(table.paths[0].0, vec!["user".to_owned()]);
        assert_eq!(table.paths[0].1, vec![(0, Some(1)), (3, None)]);
        assert_eq!(table.paths[1].0, vec!["order".to_owned()]);
        assert_eq!(table.paths[1].1, vec![(2, None)]);
    }

    #[test]
    fn dotted_path_cells_split() {
        let table = compile_table(&[
            &["path:", "in:x", "out:y"],
            &["user.profile", "1", "10"],
        ]);
        assert_eq!(
            table.scan_rows[0].path,
            vec!["user".to_owned(), "profile".to_owned()]
        );
    }
}
