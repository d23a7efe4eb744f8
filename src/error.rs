//! Error types for API misuse and schema setup.
//!
//! Domain failures never appear here: they travel inside
//! [`Outcome::Failure`](crate::Outcome). The types below cover the two other
//! kinds of error:
//!
//! - [`ContractViolation`] describes programmer errors. These are raised as
//!   panics at the point of misuse and are never converted into a `Failure`.
//! - [`SchemaError`] is returned when a validator cannot be built at all.

/// Misuse of the outcome API, reported through a panic.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// `assert_success` saw a `Failure`.
    #[error("Expected a Success result, but received a Failure")]
    ExpectedSuccess,
    /// `assert_failure` saw a `Success`.
    #[error("Expected a Failure result, but received a Success")]
    ExpectedFailure,
    /// `parse` was handed a validator that did not resolve synchronously.
    #[error("Schema validation must be synchronous")]
    AsyncSchema,
}

/// A validator could not be constructed from its definition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema document itself is invalid.
    #[error("invalid schema: {0}")]
    Compile(String),
}
