mod cell;
mod columns;
mod error;
mod index;
mod record;
mod scan_row;
mod table;
mod value;

pub use error::{ErrorKind, ParseError};
pub use record::Record;
pub use table::{Options, Table};
pub use value::{Comparator, Value};

pub(crate) use cell::{CellValue, InsProc, Matched, OutsProc, ProcKind};
pub(crate) use columns::{ColumnEntry, ColumnType, Columns, DefaultEntry, DefaultFn, DefaultGate};
pub(crate) use index::{range_rows, Index, RowRange};
pub(crate) use scan_row::ScanRow;
