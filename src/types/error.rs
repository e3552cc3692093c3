use thiserror::Error;

/// Broad classification of a table-loading failure.
///
/// Compile-time failures carry one of the first four kinds via
/// [`ParseError::kind`]; failures wrapped with a file path surface as
/// [`FileWrapped`](ErrorKind::FileWrapped) via
/// [`Error::kind`](crate::Error::kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed header or data cell.
    CellValidation,
    /// Structural problem with the table as a whole.
    TableStructure,
    /// Bad table-level option.
    OptionValidation,
    /// Any of the above (or an I/O failure) while loading from a file; the
    /// message carries the path.
    FileWrapped,
    /// Defensive assertion; indicates a bug in the engine.
    Internal,
}

/// Errors produced while parsing and compiling a decision table.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A header cell had a recognizable column type but a malformed shape.
    #[error("invalid header cell '{cell}'")]
    InvalidHeader {
        /// The offending header cell text.
        cell: String,
    },

    /// A column type that requires a name was declared without one.
    #[error("'{column_type}' column requires a name")]
    MissingColumnName {
        /// The column type as written in the header.
        column_type: String,
    },

    /// A column name contained characters outside `[A-Za-z_][\w:/!?]*`.
    #[error("invalid column name '{name}'")]
    InvalidColumnName {
        /// The rejected name.
        name: String,
    },

    /// A plain constant appeared in a column that only accepts predicates
    /// (`guard:`, `if:`, or an anonymous input column).
    #[error("constant '{cell}' not permitted in {column} column")]
    ConstantNotAllowed {
        /// The offending cell text.
        cell: String,
        /// A description of the column (e.g. `guard`, `if`).
        column: String,
    },

    /// A regexp cell failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern text as written in the cell.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// Two output columns share the same name.
    #[error("duplicate output column name '{name}'")]
    DuplicateOutputName {
        /// The duplicated name.
        name: String,
    },

    /// No row of the grid was recognizable as a header row.
    #[error("no header row found; expected cells like 'in:name' or 'out:name'")]
    MissingHeader,

    /// An options row mixed a recognized option with an unknown word.
    #[error("unknown table option '{option}'")]
    UnknownOption {
        /// The unrecognized option word.
        option: String,
    },

    /// Defensive assertion failure.
    #[error("internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl ParseError {
    /// The broad classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidHeader { .. }
            | ParseError::MissingColumnName { .. }
            | ParseError::InvalidColumnName { .. }
            | ParseError::ConstantNotAllowed { .. }
            | ParseError::InvalidPattern { .. } => ErrorKind::CellValidation,
            ParseError::DuplicateOutputName { .. } | ParseError::MissingHeader => {
                ErrorKind::TableStructure
            }
            ParseError::UnknownOption { .. } => ErrorKind::OptionValidation,
            ParseError::Internal { .. } => ErrorKind::Internal,
        }
    }
}
