use ordo_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// True for caller mistakes: out-of-range positions, foreign children,
    /// or a collection that is already full.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Precondition | ErrorKind::Capacity)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::Precondition => ErrorKind::Precondition,
            ErrorClass::CapacityExceeded => ErrorKind::Capacity,
            ErrorClass::NotFound => ErrorKind::NotFound,
            ErrorClass::Unsupported => ErrorKind::Invalid,
            ErrorClass::Internal => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Precondition,
    Capacity,
    NotFound,
    Invalid,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Precondition => "precondition",
            Self::Capacity => "capacity",
            Self::NotFound => "not_found",
            Self::Invalid => "invalid",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Order,
    Write,
    Store,
    Session,
    Config,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Order => Self::Order,
            CoreErrorOrigin::Write => Self::Write,
            CoreErrorOrigin::Store => Self::Store,
            CoreErrorOrigin::Session => Self::Session,
            CoreErrorOrigin::Config => Self::Config,
        }
    }
}

///
/// TESTS
///
