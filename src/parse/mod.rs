//! Grid parsing entry points: the compile pipeline consumes a
//! two-dimensional grid of strings; CSV text and files are tokenized into
//! that shape first.

pub(crate) mod cell;
mod header;

use std::path::Path;

use crate::types::{Options, ParseError, Table};
use crate::Error;

/// Compile a grid into a table.
pub(crate) fn table(grid: Vec<Vec<String>>, options: Options) -> Result<Table, ParseError> {
    let header = header::parse(grid, options)?;
    crate::compile::compile(header.columns, header.rows, header.options)
}

/// Tokenize CSV text and compile it.
pub(crate) fn from_csv(text: &str, options: Options) -> Result<Table, Error> {
    let grid = csv_grid(text)?;
    Ok(table(grid, options)?)
}

/// Read and compile a CSV file, wrapping any failure with the path.
pub(crate) fn from_file(path: &Path, options: Options) -> Result<Table, Error> {
    read_and_parse(path, options).map_err(|source| Error::File {
        path: path.display().to_string(),
        source: Box::new(source),
    })
}

fn read_and_parse(path: &Path, options: Options) -> Result<Table, Error> {
    let text = std::fs::read_to_string(path)?;
    from_csv(&text, options)
}

fn csv_grid(text: &str) -> Result<Vec<Vec<String>>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|cell| cell.trim_matches('\u{feff}').trim().to_owned())
                .collect(),
        );
    }
    Ok(grid)
}
