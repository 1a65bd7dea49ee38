//! Structured generation errors.

use std::fmt;

/// Broad category of a generation failure.
///
/// The string form ([`ErrorKind::as_str`]) is stable and is what crosses
/// tool boundaries; callers match on it rather than on the verbose text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed interface source.
    ParseError,
    /// A type or `use` reference that does not resolve, or a conflicting definition.
    ResolutionError,
    /// A package or library name the target ecosystem cannot accept.
    NamingError,
    /// An interface construct the selected target cannot represent.
    UnsupportedType,
    /// No emitter is registered under the requested target name.
    UnsupportedTarget,
    /// Invariant violation inside the generator.
    InternalError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "ParseError",
            Self::ResolutionError => "ResolutionError",
            Self::NamingError => "NamingError",
            Self::UnsupportedType => "UnsupportedType",
            Self::UnsupportedTarget => "UnsupportedTarget",
            Self::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generation failure: a short kind plus a self-contained explanation.
///
/// The verbose text names the offending construct and, for source errors,
/// its location, so it can be shown to a user without any other context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{verbose}")]
pub struct Error {
    kind: ErrorKind,
    verbose: String,
}

impl Error {
    pub fn new(kind: ErrorKind, verbose: impl Into<String>) -> Self {
        Self {
            kind,
            verbose: verbose.into(),
        }
    }

    pub fn naming(verbose: impl Into<String>) -> Self {
        Self::new(ErrorKind::NamingError, verbose)
    }

    pub fn unsupported_type(verbose: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedType, verbose)
    }

    pub fn internal(verbose: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, verbose)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn verbose(&self) -> &str {
        &self.verbose
    }

    /// Prepend a line of context, keeping the kind and the original text.
    ///
    /// ```
    /// use wit_pack::{Error, ErrorKind};
    ///
    /// let err = Error::naming("`Foo` is not lowercase").context("while emitting `demo`");
    /// assert_eq!(err.kind(), ErrorKind::NamingError);
    /// assert_eq!(err.verbose(), "while emitting `demo`\n  caused by: `Foo` is not lowercase");
    /// ```
    pub fn context(self, context: impl fmt::Display) -> Self {
        let mut verbose = context.to_string();
        for (i, line) in self.verbose.lines().enumerate() {
            verbose.push('\n');
            if i == 0 {
                verbose.push_str("  caused by: ");
            } else {
                verbose.push_str("  ");
            }
            verbose.push_str(line);
        }
        Self {
            kind: self.kind,
            verbose,
        }
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;
