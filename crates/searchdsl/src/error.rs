//! Error types for the searchdsl crate.

use thiserror::Error;

/// Errors that can occur when building queries or requests.
///
/// Every variant is raised at construction time. Combining, negating and
/// serializing already-built queries never fails.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A predicate was built without a field name.
    #[error("{kind} query requires a non-empty field name")]
    EmptyField { kind: &'static str },

    /// A terms query was built without any values.
    #[error("terms query on '{field}' requires at least one value")]
    EmptyTerms { field: String },

    /// A terms query mixes values of different kinds.
    #[error("terms query on '{field}' mixes {first} and {other} values")]
    MixedTermTypes {
        field: String,
        first: &'static str,
        other: &'static str,
    },

    /// A terms query used a field name that collides with a parameter key.
    #[error("terms query cannot target the reserved field '{field}'")]
    ReservedField { field: String },

    /// Floating-point values must be finite.
    #[error("{kind} query on '{field}' has a non-finite number")]
    NonFiniteValue { kind: &'static str, field: String },

    /// Boost must be a finite, non-negative number.
    #[error("invalid boost {0}: must be finite and >= 0")]
    InvalidBoost(f64),

    /// A value does not fit the kind of a well-known attribute.
    #[error("attribute '{attribute}' expects a {expected} value")]
    AttributeKindMismatch {
        attribute: &'static str,
        expected: &'static str,
    },

    /// A request was built with neither a query nor a post filter.
    #[error("search request requires a query or a post filter")]
    MissingQuery,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding or decoding JSON failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for searchdsl operations.
pub type Result<T> = std::result::Result<T, SearchError>;
