//! Error types for recollect.

use thiserror::Error;

/// Result type alias for recollect operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Usage errors surfaced at the API boundary.
///
/// Everything else (missing attributes, unknown keys, empty operations) is
/// modelled as an empty result rather than an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A record must be a JSON object.
    #[error("Record must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
    /// A join relation or where clause named a collection that was not supplied.
    #[error("Collection not found: {name}")]
    UnknownCollection { name: String },
    /// A qualified reference is not of the form `collection.attribute`.
    #[error("Invalid reference {reference:?}: expected `collection.attribute`")]
    InvalidReference { reference: String },
}

impl Error {
    /// Creates a not-an-object error for the given JSON kind.
    pub fn not_an_object(kind: &'static str) -> Self {
        Error::NotAnObject { kind }
    }

    /// Creates an unknown collection error.
    pub fn unknown_collection(name: impl Into<String>) -> Self {
        Error::UnknownCollection { name: name.into() }
    }

    /// Creates an invalid reference error.
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Error::InvalidReference {
            reference: reference.into(),
        }
    }
}
