//! Guard cells are predicates over a whole record, ignoring the column
//! value: `:country == 'US'`, `:salary > :threshold`, `:state != closed`.
//!
//! In input columns the record is the input hash. In `if:` columns the same
//! expression runs against the output record under construction, gating row
//! acceptance.

use crate::matchers::{compare_values, Role};
use crate::parse::cell::{parse_guard, GuardExpr, Operand};
use crate::types::{InsProc, Matched, OutsProc, ParseError, ProcKind, Record, Value};

pub(crate) fn matches(cell: &str, role: Role) -> Result<Option<Matched>, ParseError> {
    let Some(expr) = parse_guard(cell) else {
        return Ok(None);
    };

    match role {
        Role::Ins => Ok(Some(Matched::Ins(InsProc::new(
            ProcKind::Guard,
            move |_, hash| eval(&expr, hash),
        )))),
        Role::Outs => Ok(Some(Matched::Outs(OutsProc::new(
            ProcKind::Guard,
            move |record| Value::Bool(eval(&expr, record)),
        )))),
    }
}

fn eval(expr: &GuardExpr, record: &Record) -> bool {
    let lhs = record.fetch(&expr.field);
    let rhs = match &expr.rhs {
        Operand::Literal(value) => value.clone(),
        Operand::Field(name) => record.fetch(name),
    };
    compare_values(&lhs, expr.op, &rhs)
}
