//! A decision-table engine.
//!
//! `gavel` compiles a spreadsheet-style grid of rule rows into an immutable
//! [`Table`] and evaluates input [`Record`]s against it. Header cells type
//! the columns (`in:`, `out:`, `guard:`, `if:`, `set:`, `path:`); data cells
//! compile into constants or predicate closures via the [`Matcher`] list.
//!
//! ```
//! use gavel::{Options, Record, Table};
//!
//! let table = Table::from_csv(
//!     "in:topic, in:region, out:team\n\
//!      sports,   Europe,    Alice\n\
//!      sports,   ,          Bob\n\
//!      ,         ,          Carol\n",
//!     Options::default(),
//! )
//! .unwrap();
//!
//! let input = Record::new().set("topic", "sports").set("region", "USA");
//! assert_eq!(table.decide(&input), Record::new().set("team", "Bob"));
//! ```
//!
//! Compiled tables are frozen: share one behind an `Arc` across any number
//! of threads and call [`Table::decide`] concurrently without locks.

mod compile;
mod error;
mod evaluate;
mod input;
mod matchers;
mod parse;
mod types;

pub use error::Error;
pub use matchers::Matcher;
pub use types::{Comparator, ErrorKind, Options, ParseError, Record, Table, Value};
