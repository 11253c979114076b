//! Error types for the streaming [`Hasher`](crate::Hasher).

use core::fmt;

use crate::hasher::Phase;

/// A [`Hasher`](crate::Hasher) method was called in a phase that does not
/// allow it, e.g. `add` after `finalize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidStateError {
    operation: &'static str,
    phase: Phase,
}

impl InvalidStateError {
    pub(crate) const fn new(operation: &'static str, phase: Phase) -> Self {
        Self { operation, phase }
    }

    /// Name of the rejected operation.
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Phase the hasher was in when the operation was rejected.
    pub const fn phase(&self) -> Phase {
        self.phase
    }
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not allowed while the hasher is {}",
            self.operation, self.phase
        )
    }
}

/// The message bit length no longer fits the 256-bit length field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LengthOverflowError;

impl fmt::Display for LengthOverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("message length exceeds 2^256 - 1 bits")
    }
}

/// Any error returned by the streaming [`Hasher`](crate::Hasher).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// See [`InvalidStateError`].
    InvalidState(InvalidStateError),
    /// See [`LengthOverflowError`].
    LengthOverflow(LengthOverflowError),
}

impl From<InvalidStateError> for Error {
    fn from(err: InvalidStateError) -> Self {
        Error::InvalidState(err)
    }
}

impl From<LengthOverflowError> for Error {
    fn from(err: LengthOverflowError) -> Self {
        Error::LengthOverflow(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidState(err) => err.fmt(f),
            Error::LengthOverflow(err) => err.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidStateError {}

#[cfg(feature = "std")]
impl std::error::Error for LengthOverflowError {}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidState(err) => Some(err),
            Error::LengthOverflow(err) => Some(err),
        }
    }
}
