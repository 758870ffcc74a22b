use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressBookError {
    #[error("IO error reading {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid date of birth '{value}': {reason}")]
    DateParseError { value: String, reason: String },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Entry not found: {name}")]
    NotFound { name: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<AddressBookError>,
    },
}

/// Coarse classification of an [`AddressBookError`], independent of the
/// line it was raised on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    InvalidArgument,
    NotFound,
    Config,
}

impl AddressBookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddressBookError::IoError { .. } => ErrorKind::Io,
            AddressBookError::DateParseError { .. } => ErrorKind::Parse,
            AddressBookError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            AddressBookError::NotFound { .. } => ErrorKind::NotFound,
            AddressBookError::ConfigError { .. } => ErrorKind::Config,
            AddressBookError::AtLine { source, .. } => source.kind(),
        }
    }

    /// 1-based line number of the input line that caused the error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            AddressBookError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn at_line(self, line: usize) -> Self {
        AddressBookError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AddressBookError>;
