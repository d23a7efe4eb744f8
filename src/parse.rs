//! Adapting structural validators into outcomes.
//!
//! A validator is anything implementing [`Schema`]: it accepts an input and
//! either produces a validated value or a list of [`Issue`]s. [`parse`] turns
//! that answer into an [`Outcome`].
//!
//! Validators must answer synchronously. A schema that returns
//! [`Validation::Pending`] is a programmer error and `parse` panics with
//! [`ContractViolation::AsyncSchema`].
//!
//! ```
//! use outcomes::parse::{issue, schema_fn};
//! use outcomes::prelude::*;
//!
//! let positive = schema_fn(|n: i64| {
//!     if n > 0 { Ok(n as u64) } else { Err(vec![issue("must be positive")]) }
//! });
//!
//! assert_eq!(parse(&positive, 3), succeed(3));
//! assert_eq!(parse(&positive, -1).unwrap_error()[0].message, "must be positive");
//! ```

use crate::error::ContractViolation;
use crate::Outcome;
use futures::future::BoxFuture;
use std::fmt;

/// A single reason a validator rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Issue {
    /// Human readable description.
    pub message: String,
    /// Location of the offending part of the input, as a JSON pointer.
    pub path: Option<String>,
}

impl Issue {
    /// An issue with no path.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), path: None }
    }

    /// Attach the location of the offending value.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Shorthand for [`Issue::new`].
pub fn issue(message: impl Into<String>) -> Issue {
    Issue::new(message)
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) if !path.is_empty() => write!(f, "{path}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// A validator's answer.
pub enum Validation<'a, T> {
    /// The input is valid; here is the validated value.
    Valid(T),
    /// The input was rejected.
    Invalid(Vec<Issue>),
    /// The validator needs to wait before answering.
    Pending(BoxFuture<'a, Validation<'a, T>>),
}

impl<T: fmt::Debug> fmt::Debug for Validation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(value) => f.debug_tuple("Valid").field(value).finish(),
            Self::Invalid(issues) => f.debug_tuple("Invalid").field(issues).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

impl<T> From<Result<T, Vec<Issue>>> for Validation<'_, T> {
    fn from(result: Result<T, Vec<Issue>>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(issues) => Self::Invalid(issues),
        }
    }
}

/// The minimal capability of an external structural validator.
pub trait Schema<I> {
    /// The validated value.
    type Output;

    fn validate(&self, input: I) -> Validation<'_, Self::Output>;
}

impl<I, S> Schema<I> for &S
where
    S: Schema<I> + ?Sized,
{
    type Output = S::Output;

    fn validate(&self, input: I) -> Validation<'_, Self::Output> {
        (**self).validate(input)
    }
}

/// Validate `input` against `schema`.
///
/// # Panics
///
/// Panics with [`ContractViolation::AsyncSchema`] if the schema answers with
/// [`Validation::Pending`].
#[track_caller]
pub fn parse<I, S>(schema: &S, input: I) -> Outcome<S::Output, Vec<Issue>>
where
    S: Schema<I> + ?Sized,
{
    match schema.validate(input) {
        Validation::Valid(value) => Outcome::Success { value },
        Validation::Invalid(issues) => {
            tracing::debug!(issues = issues.len(), "schema rejected input");
            Outcome::Failure { error: issues }
        }
        Validation::Pending(_) => panic!("{}", ContractViolation::AsyncSchema),
    }
}

/// Curried [`parse`]: a reusable function validating against `schema`.
pub fn parser<I, S>(schema: S) -> impl Fn(I) -> Outcome<S::Output, Vec<Issue>>
where
    S: Schema<I>,
{
    move |input| parse(&schema, input)
}

/// A schema backed by a closure.
#[derive(Clone, Copy)]
pub struct FnSchema<F> {
    check: F,
}

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchema").finish_non_exhaustive()
    }
}

/// Adapt a closure returning `Result<T, Vec<Issue>>` into a [`Schema`].
pub fn schema_fn<I, T, F>(check: F) -> FnSchema<F>
where
    F: Fn(I) -> Result<T, Vec<Issue>>,
{
    FnSchema { check }
}

impl<I, T, F> Schema<I> for FnSchema<F>
where
    F: Fn(I) -> Result<T, Vec<Issue>>,
{
    type Output = T;

    fn validate(&self, input: I) -> Validation<'_, T> {
        (self.check)(input).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::succeed;

    struct NonEmpty;

    impl<'s> Schema<&'s str> for NonEmpty {
        type Output = String;

        fn validate(&self, input: &'s str) -> Validation<'_, String> {
            if input.trim().is_empty() {
                Validation::Invalid(vec![issue("must not be empty").at("")])
            } else {
                Validation::Valid(input.trim().to_string())
            }
        }
    }

    struct Remote;

    impl Schema<u8> for Remote {
        type Output = u8;

        fn validate(&self, input: u8) -> Validation<'_, u8> {
            Validation::Pending(Box::pin(async move { Validation::Valid(input) }))
        }
    }

    #[test]
    fn valid_input_succeeds() {
        assert_eq!(parse(&NonEmpty, "  name "), succeed("name".to_string()));
    }

    #[test]
    fn invalid_input_fails_with_issues() {
        let issues = parse(&NonEmpty, "   ").unwrap_error();
        assert_eq!(issues, vec![Issue { message: "must not be empty".into(), path: Some(String::new()) }]);
    }

    #[test]
    #[should_panic(expected = "Schema validation must be synchronous")]
    fn pending_validation_is_a_contract_violation() {
        let _ = parse(&Remote, 1);
    }

    #[test]
    fn parser_is_reusable() {
        let check = parser(NonEmpty);
        assert!(check("a").is_success());
        assert!(check("").is_failure());
    }

    #[test]
    fn closure_schemas() {
        let even = schema_fn(|n: u32| {
            if n % 2 == 0 {
                Ok(n / 2)
            } else {
                Err(vec![issue(format!("{n} is odd"))])
            }
        });
        assert_eq!(parse(&even, 10), succeed(5));
        assert_eq!(parse(&even, 3).unwrap_error()[0].to_string(), "3 is odd");
    }

    #[test]
    fn issue_display_includes_path() {
        assert_eq!(issue("required").at("/name").to_string(), "/name: required");
        assert_eq!(issue("required").to_string(), "required");
    }
}
