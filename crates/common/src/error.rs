//! Error types for the Music-Tech Shop helpers

use thiserror::Error;

/// Result type alias using the shared Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the pure helpers and fixture lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot format non-finite amount: {0}")]
    InvalidAmount(f64),

    #[error("Unparsable price text: {0:?}")]
    UnparsablePrice(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Duplicate category label: {0}")]
    DuplicateCategory(String),

    #[error("Unknown {kind} fixture: {name}")]
    UnknownFixture { kind: String, name: String },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn unknown_fixture(kind: &str, name: &str) -> Self {
        Error::UnknownFixture {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}
