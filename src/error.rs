use thiserror::Error;

use crate::types::{ErrorKind, ParseError};

/// Unified error type covering grid compilation, CSV tokenization, and I/O.
///
/// Returned by the [`Table`](crate::Table) constructors. Failures while
/// loading from a file are wrapped in [`Error::File`] so the message carries
/// the path.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("{path}: {source}")]
    File {
        /// The file the table was being loaded from.
        path: String,
        /// The underlying failure.
        source: Box<Error>,
    },
}

impl Error {
    /// The broad classification of this error.
    ///
    /// Compilation failures delegate to [`ParseError::kind`]; failures
    /// wrapped with a file path are [`ErrorKind::FileWrapped`], as are bare
    /// I/O failures (which only arise when reading a file). CSV
    /// tokenization failures classify as cell validation.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(err) => err.kind(),
            Error::Io(_) | Error::File { .. } => ErrorKind::FileWrapped,
            Error::Csv(_) => ErrorKind::CellValidation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_error_prefixes_path() {
        let inner = Error::Parse(ParseError::MissingHeader);
        let err = Error::File {
            path: "rules/routing.csv".into(),
            source: Box::new(inner),
        };
        assert_eq!(
            err.to_string(),
            "rules/routing.csv: no header row found; expected cells like 'in:name' or 'out:name'"
        );
    }

    #[test]
    fn file_error_kind_is_file_wrapped() {
        let inner = Error::Parse(ParseError::MissingHeader);
        let err = Error::File {
            path: "rules/routing.csv".into(),
            source: Box::new(inner),
        };
        assert_eq!(err.kind(), ErrorKind::FileWrapped);
    }

    #[test]
    fn parse_error_kind_delegates() {
        let err = Error::Parse(ParseError::MissingHeader);
        assert_eq!(err.kind(), ErrorKind::TableStructure);

        let err = Error::Parse(ParseError::UnknownOption {
            option: "turbo".into(),
        });
        assert_eq!(err.kind(), ErrorKind::OptionValidation);
    }

    #[test]
    fn io_error_kind_is_file_wrapped() {
        let err = Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(err.kind(), ErrorKind::FileWrapped);
    }
}
