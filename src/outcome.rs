//! The two-variant outcome value and its immediate helpers.
//!
//! An [`Outcome`] is either a `Success` carrying a value or a `Failure`
//! carrying an error. Outcomes are plain values: every combinator consumes
//! its input and produces a new outcome, nothing is mutated in place.
//!
//! ```
//! use outcomes::{fail, succeed, Outcome};
//!
//! let ok: Outcome<i32, String> = succeed(2);
//! assert_eq!(ok.map(|v| v * 10), succeed(20));
//!
//! let err: Outcome<i32, String> = fail("boom".to_string());
//! assert_eq!(err.unwrap_or(0), 0);
//! ```

use crate::error::ContractViolation;
use std::convert::Infallible;
use std::fmt;

/// A fallible computation's result, carried as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(tag = "type"))]
#[must_use = "an outcome may be a failure, which should be handled"]
pub enum Outcome<T, E> {
    /// The computation produced a value.
    Success {
        /// The produced value.
        value: T,
    },
    /// The computation failed with a modeled error.
    Failure {
        /// The modeled error.
        error: E,
    },
}

/// Build an immediate success.
///
/// The payload is never inspected: passing an outcome produces an
/// outcome-of-outcome.
pub fn succeed<T, E>(value: T) -> Outcome<T, E> {
    Outcome::Success { value }
}

/// Build an immediate failure.
pub fn fail<T, E>(error: E) -> Outcome<T, E> {
    Outcome::Failure { error }
}

/// Start a record-building chain with an empty record (see `bind`).
///
/// ```
/// use outcomes::prelude::*;
/// use std::collections::BTreeMap;
///
/// let person = begin::<BTreeMap<&str, u32>, String>()
///     .bind("age", |_| succeed(20))
///     .bind("height", |_| succeed(180));
/// assert_eq!(person.unwrap().len(), 2);
/// ```
pub fn begin<R: Default, E>() -> Outcome<R, E> {
    Outcome::Success { value: R::default() }
}

/// Free-function form of [`Outcome::is_success`].
pub fn is_success<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_success()
}

/// Free-function form of [`Outcome::is_failure`].
pub fn is_failure<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_failure()
}

impl<T, E> Outcome<T, E> {
    /// Returns `true` for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` for the `Failure` variant.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Borrow the success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Borrow the error, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Take the success value, discarding any error.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Take the error, discarding any success value.
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Borrow both payloads.
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Success { value } => Outcome::Success { value },
            Self::Failure { error } => Outcome::Failure { error },
        }
    }

    /// Transform the success value; failures pass through.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success { value } => Outcome::Success { value: f(value) },
            Self::Failure { error } => Outcome::Failure { error },
        }
    }

    /// Transform the error; successes pass through.
    pub fn map_error<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Success { value } => Outcome::Success { value },
            Self::Failure { error } => Outcome::Failure { error: f(error) },
        }
    }

    /// Return the value or panic with the error.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Failure`.
    #[track_caller]
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Self::Success { value } => value,
            Self::Failure { error } => {
                panic!("called `Outcome::unwrap()` on a `Failure` value: {error:?}")
            }
        }
    }

    /// Return the value, or `default` on failure.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Success { value } => value,
            Self::Failure { .. } => default,
        }
    }

    /// Return the value, or `f(error)` on failure.
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Self::Success { value } => value,
            Self::Failure { error } => f(error),
        }
    }

    /// Return the error or panic with the success value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Success`.
    #[track_caller]
    pub fn unwrap_error(self) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Self::Success { value } => {
                panic!("called `Outcome::unwrap_error()` on a `Success` value: {value:?}")
            }
            Self::Failure { error } => error,
        }
    }

    /// Return the error, or `default` on success.
    pub fn unwrap_error_or(self, default: E) -> E {
        match self {
            Self::Success { .. } => default,
            Self::Failure { error } => error,
        }
    }

    /// Convert into a `Result` so `?` can be used at a boundary.
    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T> Outcome<T, Infallible> {
    /// Extract the value of an outcome that statically cannot fail.
    pub fn into_value(self) -> T {
        match self {
            Self::Success { value } => value,
            Self::Failure { error } => match error {},
        }
    }
}

impl<E> Outcome<Infallible, E> {
    /// Extract the error of an outcome that statically cannot succeed.
    pub fn into_error(self) -> E {
        match self {
            Self::Success { value } => match value {},
            Self::Failure { error } => error,
        }
    }
}

/// Narrow an immediate outcome to its success side.
///
/// # Panics
///
/// Panics with [`ContractViolation::ExpectedSuccess`] on a failure.
#[track_caller]
pub(crate) fn expect_success<T, E>(outcome: Outcome<T, E>) -> Outcome<T, Infallible> {
    match outcome {
        Outcome::Success { value } => Outcome::Success { value },
        Outcome::Failure { .. } => panic!("{}", ContractViolation::ExpectedSuccess),
    }
}

/// Narrow an immediate outcome to its failure side.
///
/// # Panics
///
/// Panics with [`ContractViolation::ExpectedFailure`] on a success.
#[track_caller]
pub(crate) fn expect_failure<T, E>(outcome: Outcome<T, E>) -> Outcome<Infallible, E> {
    match outcome {
        Outcome::Success { .. } => panic!("{}", ContractViolation::ExpectedFailure),
        Outcome::Failure { error } => Outcome::Failure { error },
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success { value },
            Err(error) => Self::Failure { error },
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success { value } => Ok(value),
            Outcome::Failure { error } => Err(error),
        }
    }
}

/// Fail-fast collection: stops at the first failure and returns its error.
impl<T, E, V> FromIterator<Outcome<T, E>> for Outcome<V, E>
where
    V: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        let mut first_error = None;
        let values: V = iter
            .into_iter()
            .map_while(|outcome| match outcome {
                Outcome::Success { value } => Some(value),
                Outcome::Failure { error } => {
                    first_error = Some(error);
                    None
                }
            })
            .collect();
        match first_error {
            Some(error) => Outcome::Failure { error },
            None => Outcome::Success { value: values },
        }
    }
}
