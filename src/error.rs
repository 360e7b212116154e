//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns [`Result`], an alias for
//! `std::result::Result<T, Error>`. [`Error`] carries a [`ErrorKind`] that
//! callers can match on without parsing message text: construction via
//! `Error::invalid_argument(..)` and friends, inspection via the public
//! `kind` field.

use std::{fmt, io};

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`], so callers can branch on failure
/// category without string-matching the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad construction-time parameters: unsupported format, non-positive
    /// window/channels/rate.
    InvalidArgument,
    /// An invariant the caller is responsible for upholding was violated
    /// (a codec write outside the representable range).
    FailedPrecondition,
    /// An internal invariant was violated that indicates a defect in this
    /// crate rather than caller misuse (more `add`s than `remove`s on the
    /// rolling maximum).
    Internal,
    /// The downstream sink failed.
    Unavailable,
}

/// An error produced by this crate.
#[derive(Debug)]
pub struct Error {
    /// The category of failure.
    pub kind: ErrorKind,
    message: String,
    source: Option<io::Error>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Bad construction-time parameters.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// A caller-side invariant was violated (e.g. a codec write outside
    /// the representable range).
    #[must_use]
    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FailedPrecondition, message)
    }

    /// An internal invariant was violated; this indicates a defect in the
    /// crate, not in the caller.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// The downstream sink failed.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self {
            kind: ErrorKind::Unavailable,
            message: "downstream sink failed".to_string(),
            source: Some(err),
        }
    }
}
