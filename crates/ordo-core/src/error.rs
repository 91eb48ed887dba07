use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; the facade crate maps it onto its public error.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct an order-origin precondition violation.
    ///
    /// Raised before any mutation is staged, so the caller never observes a
    /// partially applied operation.
    pub(crate) fn order_precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Precondition, ErrorOrigin::Order, message)
    }

    /// Construct a session-origin precondition violation.
    pub(crate) fn session_precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Precondition, ErrorOrigin::Session, message)
    }

    /// Construct a capacity error for a collection that cannot grow further.
    pub(crate) fn capacity_exceeded(len: usize, max: usize) -> Self {
        Self::new(
            ErrorClass::CapacityExceeded,
            ErrorOrigin::Order,
            format!("collection capacity exceeded: {len} children, maximum is {max}"),
        )
    }

    /// Construct a store-origin not-found error for a child key.
    pub fn store_not_found(key: impl fmt::Display) -> Self {
        Self::new(
            ErrorClass::NotFound,
            ErrorOrigin::Store,
            format!("child not found: {key}"),
        )
    }

    /// Construct a store-origin internal error.
    pub(crate) fn store_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Store, message)
    }

    /// Construct a write-origin invariant failure.
    pub(crate) fn write_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Write, message)
    }

    /// Construct a config-origin unsupported error.
    pub(crate) fn config_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Config, message)
    }

    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self.class, ErrorClass::Precondition)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Precondition,
    CapacityExceeded,
    NotFound,
    Internal,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Precondition => "precondition",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Order,
    Write,
    Store,
    Session,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Order => "order",
            Self::Write => "write",
            Self::Store => "store",
            Self::Session => "session",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = InternalError::order_precondition("move position 7 out of range for 3 children");

        assert_eq!(
            err.display_with_class(),
            "order:precondition: move position 7 out of range for 3 children"
        );
        assert!(err.is_precondition());
    }

    #[test]
    fn capacity_error_reports_limit() {
        let err = InternalError::capacity_exceeded(4, 4);

        assert_eq!(err.class, ErrorClass::CapacityExceeded);
        assert_eq!(
            err.to_string(),
            "collection capacity exceeded: 4 children, maximum is 4"
        );
    }
}
