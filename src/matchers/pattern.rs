//! Regexp cells: `=~ <pattern>` tests the value against the pattern, `!~`
//! negates it, and `!= <text>` is plain string inequality. With the
//! `regexp_implicit` option a bare cell is promoted to `=~` when it contains
//! at least one non-word character. A value starting with `:` is never a
//! pattern (symbol references belong to the symbol matcher).

use regex::Regex;

use crate::types::{InsProc, Matched, ParseError, ProcKind};

pub(crate) fn matches(cell: &str, regexp_implicit: bool) -> Result<Option<Matched>, ParseError> {
    let (comparator, value) = match split_comparator(cell) {
        Some(parts) => parts,
        None if regexp_implicit && implicit_pattern(cell) => ("=~", cell),
        None => return Ok(None),
    };

    if value.is_empty() || value.starts_with(':') {
        return Ok(None);
    }

    let proc = match comparator {
        "!=" => {
            let literal = value.to_owned();
            InsProc::new(ProcKind::Proc, move |value, _| {
                value.as_text().is_none_or(|text| text != literal)
            })
        }
        negate @ ("=~" | "!~") => {
            let negate = negate == "!~";
            let pattern = Regex::new(value).map_err(|source| ParseError::InvalidPattern {
                pattern: value.to_owned(),
                source,
            })?;
            InsProc::new(ProcKind::Proc, move |value, _| {
                match value.as_text() {
                    Some(text) => pattern.is_match(&text) != negate,
                    None => false,
                }
            })
        }
        _ => {
            return Err(ParseError::Internal {
                message: format!("unhandled pattern comparator in '{cell}'"),
            });
        }
    };

    Ok(Some(Matched::Ins(proc)))
}

fn split_comparator(cell: &str) -> Option<(&'static str, &str)> {
    for comparator in ["=~", "!~", "!="] {
        if let Some(rest) = cell.strip_prefix(comparator) {
            return Some((comparator, rest.trim_start()));
        }
    }
    None
}

/// A bare cell reads as an implicit regexp only when it contains a non-word
/// character and does not begin with `:`.
fn implicit_pattern(cell: &str) -> bool {
    !cell.starts_with(':')
        && cell
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
}
