//! Numeric range cells: `1..10` matches values inside the inclusive range,
//! `!1..10` matches values outside it. Non-numeric input values never match.

use crate::parse::cell::parse_range;
use crate::types::{InsProc, Matched, ParseError, ProcKind};

pub(crate) fn matches(cell: &str) -> Result<Option<Matched>, ParseError> {
    let Some((negated, min, max)) = parse_range(cell) else {
        return Ok(None);
    };
    let (Some(min), Some(max)) = (min.as_num(), max.as_num()) else {
        return Err(ParseError::Internal {
            message: format!("range bounds in '{cell}' did not parse as numbers"),
        });
    };

    Ok(Some(Matched::Ins(InsProc::new(
        ProcKind::Proc,
        move |value, _| match value.as_num() {
            Some(n) => (min <= n && n <= max) != negated,
            None => false,
        },
    ))))
}
