//! Symbol cells compare the column's input value against another field of
//! the record: `:parent` tests equality with `hash[parent]`, and a leading
//! comparator picks the operation (`> :floor`, `!= :sibling`).
//!
//! In an output column a bare `:field` copies that input field into the
//! result.

use crate::matchers::{compare_values, Role};
use crate::parse::cell::parse_symbol;
use crate::types::{InsProc, Matched, OutsProc, ParseError, ProcKind};

pub(crate) fn matches(cell: &str, role: Role) -> Result<Option<Matched>, ParseError> {
    let Some((op, name)) = parse_symbol(cell) else {
        return Ok(None);
    };

    match role {
        Role::Ins => Ok(Some(Matched::Ins(InsProc::new(
            ProcKind::Proc,
            move |value, hash| compare_values(value, op, &hash.fetch(&name)),
        )))),
        Role::Outs => {
            // Only the bare `:field` form makes sense as an output value.
            if !cell.starts_with(':') {
                return Ok(None);
            }
            Ok(Some(Matched::Outs(OutsProc::new(
                ProcKind::Expression,
                move |hash| hash.fetch(&name),
            ))))
        }
    }
}
