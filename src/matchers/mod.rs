//! Cell matchers: each inspects a data cell's text and, if it recognizes the
//! shape, compiles it into a constant or a predicate closure.
//!
//! At compile time the table's matcher list is tried in declared order and
//! the first matcher to claim a cell wins. Cells claimed by no matcher
//! become plain string constants.

mod constant;
mod guard;
mod numeric;
mod pattern;
mod range;
mod symbol;

use crate::types::{Comparator, Matched, Options, ParseError, Value};

/// The cell matcher variants, tried in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// `n..m` / `!n..m` numeric ranges.
    Range,
    /// `> 5`-style numeric comparisons.
    Numeric,
    /// `=~` / `!~` / `!=` regexp and string-inequality cells.
    Pattern,
    /// Typed literals: `nil`, `true`, `false`, numbers.
    Constant,
    /// `:field` references comparing against another input field.
    Symbol,
    /// `:field <op> <value>` predicates over the whole record.
    Guard,
}

/// Whether a cell is being compiled for an input or an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Ins,
    Outs,
}

impl Matcher {
    /// The default matcher list, in dispatch order.
    pub const DEFAULT: &'static [Matcher] = &[
        Matcher::Range,
        Matcher::Numeric,
        Matcher::Pattern,
        Matcher::Constant,
        Matcher::Symbol,
        Matcher::Guard,
    ];

    /// Whether this matcher also serves output columns (`out:`, `if:`).
    pub(crate) fn for_outs(self) -> bool {
        matches!(self, Matcher::Constant | Matcher::Symbol | Matcher::Guard)
    }

    pub(crate) fn matches(
        self,
        cell: &str,
        role: Role,
        options: &Options,
    ) -> Result<Option<Matched>, ParseError> {
        match self {
            Matcher::Range => range::matches(cell),
            Matcher::Numeric => numeric::matches(cell),
            Matcher::Pattern => pattern::matches(cell, options.regexp_implicit),
            Matcher::Constant => constant::matches(cell),
            Matcher::Symbol => symbol::matches(cell, role),
            Matcher::Guard => guard::matches(cell, role),
        }
    }
}

/// Try the table's matchers in order; the first recognizer wins. Returns
/// `None` when no matcher claims the cell.
pub(crate) fn dispatch(
    cell: &str,
    role: Role,
    options: &Options,
) -> Result<Option<Matched>, ParseError> {
    for matcher in options.effective_matchers() {
        if role == Role::Outs && !matcher.for_outs() {
            continue;
        }
        if let Some(matched) = matcher.matches(cell, role, options)? {
            return Ok(Some(matched));
        }
    }
    Ok(None)
}

/// Compare two values, falling back to numeric coercion when the typed
/// comparison is undefined (e.g. the string `"5"` against the integer `5`).
pub(crate) fn compare_values(lhs: &Value, op: Comparator, rhs: &Value) -> bool {
    if let Some(result) = lhs.compare(op, rhs) {
        return result;
    }
    match (lhs.as_num(), rhs.as_num()) {
        (Some(a), Some(b)) => compare_nums(op, a, b),
        _ => false,
    }
}

pub(crate) fn compare_nums(op: Comparator, a: f64, b: f64) -> bool {
    match op {
        Comparator::Eq => a == b,
        Comparator::Neq => a != b,
        Comparator::Gt => a > b,
        Comparator::Gte => a >= b,
        Comparator::Lt => a < b,
        Comparator::Lte => a <= b,
    }
}
