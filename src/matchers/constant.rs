//! Typed constant cells: `nil`, `true`, `false`, integers, and floats.
//! Plain strings are deliberately not claimed here; cells no matcher claims
//! become string constants during scan-row compilation.

use crate::parse::cell::parse_typed_constant;
use crate::types::{Matched, ParseError};

pub(crate) fn matches(cell: &str) -> Result<Option<Matched>, ParseError> {
    Ok(parse_typed_constant(cell).map(Matched::Constant))
}
