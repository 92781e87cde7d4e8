//! Error types for mock synthesis and batch orchestration

use std::path::PathBuf;

use thiserror::Error;

use crate::render::formatter::FormatError;

/// Category of a [`MockError`], as reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Interface or one of its methods did not match the expected grammar
    NotFound,
    /// Single-request input declared more than one interface
    AmbiguousInput,
    /// Generated source was rejected by the formatter
    Render,
    /// Reading, writing or formatter invocation failed
    Io,
    /// Neither a file nor an interface name was given, or the input isn't text
    Usage,
}

impl ErrorKind {
    /// Returns the string representation of the error kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AmbiguousInput => "ambiguous_input",
            ErrorKind::Render => "render",
            ErrorKind::Io => "io",
            ErrorKind::Usage => "usage",
        }
    }
}

#[derive(Debug, Error)]
pub enum MockError {
    #[error("couldn't find interface {0}")]
    InterfaceNotFound(String),

    #[error("couldn't parse method {line:?} of interface {interface}")]
    MethodNotFound { interface: String, line: String },

    #[error("invalid method signature {signature:?}: {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("no interface declaration found in input")]
    NoInterface,

    #[error("no match between interface name and file path found, please add one manually")]
    NoMatches,

    #[error("more than one interface found ({}), only one at a time is supported", .0.join(", "))]
    AmbiguousInput(Vec<String>),

    #[error("failed to format generated mock for {interface}: {source}")]
    Render {
        interface: String,
        #[source]
        source: FormatError,
        unformatted: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("please provide at least an interface name or a file path")]
    Usage,

    #[error("source text is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] std::string::FromUtf8Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

impl MockError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MockError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MockError::InterfaceNotFound(_)
            | MockError::MethodNotFound { .. }
            | MockError::InvalidSignature { .. }
            | MockError::NoInterface
            | MockError::NoMatches => ErrorKind::NotFound,
            MockError::AmbiguousInput(_) => ErrorKind::AmbiguousInput,
            MockError::Render { .. } | MockError::TreeSitter(_) => ErrorKind::Render,
            MockError::Io { .. } => ErrorKind::Io,
            MockError::Usage | MockError::InvalidEncoding(_) => ErrorKind::Usage,
        }
    }

    /// Raw template expansion that the formatter rejected, for diagnostics
    pub fn unformatted(&self) -> Option<&str> {
        match self {
            MockError::Render { unformatted, .. } => Some(unformatted),
            _ => None,
        }
    }
}
