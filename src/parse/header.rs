//! Header parsing: recognizes the header row, builds the typed column
//! dictionary, strips empty header columns, and consumes pre-header option
//! rows.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{ColumnEntry, ColumnType, Columns, Options, ParseError};

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(in/text|out/text|set/nil|set/blank|in|out|set|path|guard|cond|if)\s*:\s*(.*)$")
        .expect("header pattern is a valid regex")
});

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][\w:/!?]*$").expect("name pattern is a valid regex")
});

/// The parsed grid prelude: column dictionary, effective options, and the
/// data rows (trimmed and projected onto the kept columns).
#[derive(Debug)]
pub(crate) struct Header {
    pub(crate) columns: Columns,
    pub(crate) options: Options,
    pub(crate) rows: Vec<Vec<String>>,
}

pub(crate) fn parse(grid: Vec<Vec<String>>, mut options: Options) -> Result<Header, ParseError> {
    let mut rows = grid.into_iter();

    let header = loop {
        match rows.next() {
            Some(row) if is_header_row(&row) => break row,
            Some(row) => apply_option_row(&row, &mut options)?,
            None => return Err(ParseError::MissingHeader),
        }
    };

    let mut columns = Columns::new();
    let mut kept: Vec<usize> = Vec::new();
    for (position, cell) in header.iter().enumerate() {
        let cell = cell.trim();
        if cell.is_empty() {
            // Blank header cell: strip the column from the whole table.
            continue;
        }
        let entry = column_entry(cell)?;
        columns.push(kept.len(), entry)?;
        kept.push(position);
    }

    let rows = rows
        .map(|row| {
            kept.iter()
                .map(|&i| row.get(i).map_or_else(String::new, |s| s.trim().to_owned()))
                .collect()
        })
        .collect();

    Ok(Header {
        columns,
        options,
        rows,
    })
}

fn is_header_row(row: &[String]) -> bool {
    row.iter().any(|cell| HEADER_RE.is_match(cell.trim()))
}

fn column_entry(cell: &str) -> Result<ColumnEntry, ParseError> {
    let caps = HEADER_RE
        .captures(cell)
        .ok_or_else(|| ParseError::InvalidHeader {
            cell: cell.to_owned(),
        })?;

    let type_word = caps[1].to_ascii_lowercase();
    let (column_type, text_only) = match type_word.as_str() {
        "in" | "cond" => (ColumnType::In, None),
        "in/text" => (ColumnType::In, Some(true)),
        "out" => (ColumnType::Out, None),
        "out/text" => (ColumnType::Out, Some(true)),
        "guard" => (ColumnType::Guard, None),
        "if" => (ColumnType::If, None),
        "set" => (ColumnType::Set, None),
        "set/nil" => (ColumnType::SetNil, None),
        "set/blank" => (ColumnType::SetBlank, None),
        "path" => (ColumnType::Path, None),
        other => {
            return Err(ParseError::Internal {
                message: format!("unhandled column type '{other}'"),
            });
        }
    };

    let name = normalize_name(caps[2].trim())?;
    let anonymous_ok = matches!(
        column_type,
        ColumnType::Guard | ColumnType::If | ColumnType::Path
    ) || type_word == "cond";

    let name = match (name, column_type) {
        // Guards and ifs are anonymous by definition.
        (_, ColumnType::Guard | ColumnType::If) => None,
        (None, _) if !anonymous_ok => {
            return Err(ParseError::MissingColumnName {
                column_type: type_word,
            });
        }
        (name, _) => name,
    };

    Ok(ColumnEntry {
        name,
        column_type,
        text_only,
        indexed: column_type == ColumnType::In,
    })
}

/// Interior whitespace becomes `_`, then the result must be a well-formed
/// name.
fn normalize_name(raw: &str) -> Result<Option<String>, ParseError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let name: String = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if !NAME_RE.is_match(&name) {
        return Err(ParseError::InvalidColumnName { name });
    }
    Ok(Some(name))
}

fn apply_option_row(row: &[String], options: &mut Options) -> Result<(), ParseError> {
    let words: Vec<String> = row
        .iter()
        .map(|cell| cell.trim().to_ascii_lowercase())
        .filter(|cell| !cell.is_empty())
        .collect();

    // Rows with no recognized option word are free-text preamble.
    if !words.iter().any(|w| is_option_word(w)) {
        return Ok(());
    }

    for word in words {
        match word.as_str() {
            "first_match" => options.first_match = true,
            "accumulate" => options.first_match = false,
            "regexp_implicit" => options.regexp_implicit = true,
            "text_only" | "string_search" => options.text_only = true,
            other => {
                return Err(ParseError::UnknownOption {
                    option: other.to_owned(),
                });
            }
        }
    }
    Ok(())
}

fn is_option_word(word: &str) -> bool {
    matches!(
        word,
        "first_match" | "accumulate" | "regexp_implicit" | "text_only" | "string_search"
    )
}
