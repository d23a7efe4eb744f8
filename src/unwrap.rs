//! Leaving the outcome algebra.
//!
//! These functions accept either shape: an immediate outcome yields its
//! payload now, a deferred one yields a future of it. Forcing the wrong
//! variant without a default panics, which is how a failure re-enters
//! ordinary control flow at an explicitly chosen boundary.
//!
//! ```
//! use outcomes::prelude::*;
//!
//! assert_eq!(unwrap(succeed::<i32, String>(2)), 2);
//! assert_eq!(unwrap_or(fail::<i32, String>("gone".into()), 0), 0);
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let later: Deferred<'static, i32, String> = Deferred::ready(fail("gone".into()));
//! assert_eq!(unwrap_error(later).await, "gone");
//! # });
//! ```

use crate::completion::Completion;
use crate::outcome::{expect_failure, expect_success};
use std::convert::Infallible;
use std::fmt::Debug;

/// The success value; panics with the error's `Debug` rendering on failure.
pub fn unwrap<'a, C>(completion: C) -> C::Eventual<C::Value>
where
    C: Completion<'a>,
    C::Error: Debug,
{
    completion.settle_into(|outcome| outcome.unwrap())
}

/// The success value, or `default` on failure.
pub fn unwrap_or<'a, C>(completion: C, default: C::Value) -> C::Eventual<C::Value>
where
    C: Completion<'a>,
{
    completion.settle_into(move |outcome| outcome.unwrap_or(default))
}

/// The success value, or `f(error)` on failure.
pub fn unwrap_or_else<'a, C, F>(completion: C, f: F) -> C::Eventual<C::Value>
where
    C: Completion<'a>,
    F: FnOnce(C::Error) -> C::Value + Send + 'a,
{
    completion.settle_into(move |outcome| outcome.unwrap_or_else(f))
}

/// The error; panics with the value's `Debug` rendering on success.
pub fn unwrap_error<'a, C>(completion: C) -> C::Eventual<C::Error>
where
    C: Completion<'a>,
    C::Value: Debug,
{
    completion.settle_into(|outcome| outcome.unwrap_error())
}

/// The error, or `default` on success.
pub fn unwrap_error_or<'a, C>(completion: C, default: C::Error) -> C::Eventual<C::Error>
where
    C: Completion<'a>,
{
    completion.settle_into(move |outcome| outcome.unwrap_error_or(default))
}

/// Narrow to the success side, panicking if the outcome is a failure.
///
/// Useful once an earlier stage such as `or_else` has ruled failures out.
pub fn assert_success<'a, C>(completion: C) -> C::Shape<C::Value, Infallible>
where
    C: Completion<'a>,
{
    completion.settle_with(expect_success)
}

/// Narrow to the failure side, panicking if the outcome is a success.
pub fn assert_failure<'a, C>(completion: C) -> C::Shape<Infallible, C::Error>
where
    C: Completion<'a>,
{
    completion.settle_with(expect_failure)
}
