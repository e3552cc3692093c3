//! Numeric comparison cells: `> 5`, `<= 2.5`, `!= 0`. The input value is
//! coerced to a number (strings parse); non-numeric values never match.

use crate::matchers::compare_nums;
use crate::parse::cell::parse_numeric;
use crate::types::{InsProc, Matched, ParseError, ProcKind};

pub(crate) fn matches(cell: &str) -> Result<Option<Matched>, ParseError> {
    let Some((op, bound)) = parse_numeric(cell) else {
        return Ok(None);
    };
    let Some(bound) = bound.as_num() else {
        return Err(ParseError::Internal {
            message: format!("numeric bound in '{cell}' did not parse as a number"),
        });
    };

    Ok(Some(Matched::Ins(InsProc::new(
        ProcKind::Proc,
        move |value, _| match value.as_num() {
            Some(n) => compare_nums(op, n, bound),
            None => false,
        },
    ))))
}
