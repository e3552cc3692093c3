use std::fmt;
use std::sync::Arc;

use super::record::Record;
use super::value::Value;

/// Predicate closure compiled for an input cell: `(value, hash) -> bool`.
pub(crate) type InsFn = Arc<dyn Fn(&Value, &Record) -> bool + Send + Sync>;

/// Function closure compiled for an output cell: `(hash) -> value`.
pub(crate) type OutsFn = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// What kind of program a matcher compiled a cell into. Guards get their own
/// tag because `guard:`/`if:` columns accept only predicate cells, and
/// expressions (value-producing closures) are distinguished from boolean
/// predicates during output assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcKind {
    Proc,
    Guard,
    Expression,
}

/// A compiled input predicate with its kind tag.
#[derive(Clone)]
pub(crate) struct InsProc {
    pub(crate) kind: ProcKind,
    pub(crate) test: InsFn,
}

/// A compiled output function with its kind tag.
#[derive(Clone)]
pub(crate) struct OutsProc {
    pub(crate) kind: ProcKind,
    pub(crate) eval: OutsFn,
}

/// Compile-time result for one grid cell.
#[derive(Clone)]
pub(crate) enum CellValue {
    /// Wildcard: matches anything on input, produces nothing on output.
    Empty,
    /// A literal value, compared with plain equality (input) or copied into
    /// the result (output).
    Constant(Value),
    /// A compiled input predicate.
    Ins(InsProc),
    /// A compiled output function.
    Outs(OutsProc),
}

/// What a matcher produced for a cell, before the scan row folds constants
/// into its constants set.
#[derive(Debug)]
pub(crate) enum Matched {
    Constant(Value),
    Ins(InsProc),
    Outs(OutsProc),
}

impl From<Matched> for CellValue {
    fn from(m: Matched) -> Self {
        match m {
            Matched::Constant(v) => CellValue::Constant(v),
            Matched::Ins(p) => CellValue::Ins(p),
            Matched::Outs(p) => CellValue::Outs(p),
        }
    }
}

impl InsProc {
    pub(crate) fn new(
        kind: ProcKind,
        test: impl Fn(&Value, &Record) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            test: Arc::new(test),
        }
    }
}

impl OutsProc {
    pub(crate) fn new(
        kind: ProcKind,
        eval: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            eval: Arc::new(eval),
        }
    }
}

impl fmt::Debug for InsProc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsProc").field("kind", &self.kind).finish()
    }
}

impl fmt::Debug for OutsProc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutsProc").field("kind", &self.kind).finish()
    }
}

impl fmt::Debug for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "Empty"),
            CellValue::Constant(v) => write!(f, "Constant({v})"),
            CellValue::Ins(p) => write!(f, "Ins({:?})", p.kind),
            CellValue::Outs(p) => write!(f, "Outs({:?})", p.kind),
        }
    }
}
