//! Error types for Quarry.

use std::fmt;

/// The main error type for Quarry operations.
///
/// Only store-backed code paths produce these. Contexts that never touch a
/// store use an uninhabited error type instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A lock was poisoned (internal error)
    LockPoisoned,

    /// A field argument was rejected
    InvalidField(String),

    /// Invalid operation
    InvalidOperation(String),

    /// Invalid configuration
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LockPoisoned => write!(f, "Lock poisoned"),
            Error::InvalidField(name) => write!(f, "Invalid field: {:?}", name),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for Quarry operations.
pub type Result<T> = std::result::Result<T, Error>;
