//! Shared grammar for data-cell expressions.
//!
//! The matchers recognize small expression shapes inside cells: comparators,
//! numeric literals, quoted strings, `:field` references, and guard
//! expressions. Each entry point parses a complete (pre-trimmed) cell and
//! returns `None` when the cell has some other shape, letting the matcher
//! dispatch fall through.

use winnow::ascii::dec_int;
use winnow::combinator::{alt, opt, preceded};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::{Comparator, Value};

/// Right-hand side of a symbol or guard comparison.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Literal(Value),
    Field(String),
}

/// A guard expression: compare `hash[field]` against an operand.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GuardExpr {
    pub(crate) field: String,
    pub(crate) op: Comparator,
    pub(crate) rhs: Operand,
}

// -- Cell entry points ------------------------------------------------------

/// `<comparator> <number>`, e.g. `> 5`, `!= 3.5`.
pub(crate) fn parse_numeric(cell: &str) -> Option<(Comparator, Value)> {
    (comparator, preceded(ws, number)).parse(cell).ok()
}

/// `n..m` or `!n..m`, numeric inclusive range.
pub(crate) fn parse_range(cell: &str) -> Option<(bool, Value, Value)> {
    (opt('!'), number, "..", number)
        .map(|(neg, min, _, max)| (neg.is_some(), min, max))
        .parse(cell)
        .ok()
}

/// `:name` or `<comparator> :name`: compares the column value against
/// another input field.
pub(crate) fn parse_symbol(cell: &str) -> Option<(Comparator, String)> {
    (opt((comparator, ws)), symbol_ref)
        .map(|(cmp, name)| (cmp.map_or(Comparator::Eq, |(c, ())| c), name.to_owned()))
        .parse(cell)
        .ok()
}

/// `:name <comparator> <operand>`: a predicate over the whole record.
pub(crate) fn parse_guard(cell: &str) -> Option<GuardExpr> {
    (symbol_ref, preceded(ws, comparator), preceded(ws, operand))
        .map(|(field, op, rhs)| GuardExpr {
            field: field.to_owned(),
            op,
            rhs,
        })
        .parse(cell)
        .ok()
}

/// A typed literal: `nil`, `true`, `false`, or a number.
pub(crate) fn parse_typed_constant(cell: &str) -> Option<Value> {
    alt((
        "nil".value(Value::Nil),
        "true".value(Value::Bool(true)),
        "false".value(Value::Bool(false)),
        number,
    ))
    .parse(cell)
    .ok()
}

// -- Building blocks --------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

fn comparator(input: &mut &str) -> ModalResult<Comparator> {
    alt((
        ">=".value(Comparator::Gte),
        ">".value(Comparator::Gt),
        "<=".value(Comparator::Lte),
        "<".value(Comparator::Lt),
        "==".value(Comparator::Eq),
        "!=".value(Comparator::Neq),
        "=".value(Comparator::Eq),
    ))
    .parse_next(input)
}

fn float_literal(input: &mut &str) -> ModalResult<f64> {
    // Only match floats that contain a decimal point, so `1..10` leaves the
    // range dots alone.
    (
        opt(alt(('-', '+'))),
        take_while(1.., |c: char| c.is_ascii_digit()),
        '.',
        take_while(1.., |c: char| c.is_ascii_digit()),
    )
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<Value> {
    alt((
        float_literal.map(Value::Float),
        dec_int::<_, i64, _>.map(Value::Int),
    ))
    .parse_next(input)
}

/// Field names referenced from cells: `[A-Za-z_][A-Za-z0-9_/!?]*`.
fn field_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '!' | '?')
        }),
    )
        .take()
        .parse_next(input)
}

fn symbol_ref<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded(':', field_name).parse_next(input)
}

fn double_quoted(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn single_quoted(input: &mut &str) -> ModalResult<String> {
    ('\'', take_while(0.., |c: char| c != '\''), '\'')
        .map(|(_, s, _): (char, &str, char)| s.to_owned())
        .parse_next(input)
}

fn bare_word(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| !c.is_ascii_whitespace())
        .map(str::to_owned)
        .parse_next(input)
}

fn operand(input: &mut &str) -> ModalResult<Operand> {
    alt((
        symbol_ref.map(|name| Operand::Field(name.to_owned())),
        double_quoted.map(|s| Operand::Literal(Value::String(s))),
        single_quoted.map(|s| Operand::Literal(Value::String(s))),
        // A bare word is a typed literal when it reads as one, else a string.
        bare_word.map(|s| match parse_typed_constant(&s) {
            Some(v) => Operand::Literal(v),
            None => Operand::Literal(Value::String(s)),
        }),
    ))
    .parse_next(input)
}
