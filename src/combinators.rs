//! Curried combinators for pipe-style composition.
//!
//! Each function takes the continuation now and the outcome later, returning
//! a stage usable with [`pipe!`](crate::pipe) or [`Pipe::pipe`](crate::Pipe).
//! The shape rules are the same as the methods on [`Completion`].
//!
//! ```
//! use outcomes::combinators::{and_then, map, map_error};
//! use outcomes::prelude::*;
//!
//! let out: Outcome<String, usize> = pipe!(
//!     succeed::<i32, String>(20),
//!     map(|v: i32| v + 1),
//!     and_then(|v: i32| if v > 0 { succeed(v) } else { fail("negative".to_string()) }),
//!     map(|v: i32| v.to_string()),
//!     map_error(|e: String| e.len()),
//! );
//! assert_eq!(out, succeed("21".to_string()));
//! ```
//!
//! Closures whose bodies call methods on their argument need a type
//! annotation: the stage is built before the outcome it will receive.
//!
//! The exits from [`unwrap`](crate::unwrap) have stage forms too, so a
//! pipeline can end by leaving the algebra:
//!
//! ```
//! use outcomes::combinators::{map, unwrap_or};
//! use outcomes::prelude::*;
//!
//! let port: u16 = pipe!(
//!     fail::<u16, String>("unset".to_string()),
//!     map(|p: u16| p + 1),
//!     unwrap_or(8080),
//! );
//! assert_eq!(port, 8080);
//! ```

use crate::completion::{Completion, Effect};
use crate::record::Record;
use std::convert::Infallible;
use std::fmt::Debug;

/// Curried [`Completion::map`].
pub fn map<'a, I, U, F>(f: F) -> impl FnOnce(I) -> I::Shape<U, I::Error>
where
    I: Completion<'a>,
    U: Send + 'a,
    F: FnOnce(I::Value) -> U + Send + 'a,
{
    move |input: I| Completion::map(input, f)
}

/// Curried [`Completion::map_error`].
pub fn map_error<'a, I, E2, F>(f: F) -> impl FnOnce(I) -> I::Shape<I::Value, E2>
where
    I: Completion<'a>,
    E2: Send + 'a,
    F: FnOnce(I::Error) -> E2 + Send + 'a,
{
    move |input: I| Completion::map_error(input, f)
}

/// Curried [`Completion::and_then`].
pub fn and_then<'a, I, C, F>(f: F) -> impl FnOnce(I) -> I::Join<C, C::Value, I::Error>
where
    I: Completion<'a>,
    C: Completion<'a, Error = I::Error>,
    F: FnOnce(I::Value) -> C + Send + 'a,
{
    move |input: I| input.and_then(f)
}

/// Curried [`Completion::and_through`].
pub fn and_through<'a, I, C, F>(f: F) -> impl FnOnce(I) -> I::Join<C, I::Value, I::Error>
where
    I: Completion<'a>,
    C: Completion<'a, Error = I::Error>,
    F: FnOnce(&I::Value) -> C + Send + 'a,
{
    move |input: I| input.and_through(f)
}

/// Curried [`Completion::or_else`].
pub fn or_else<'a, I, C, F>(f: F) -> impl FnOnce(I) -> I::Join<C, I::Value, C::Error>
where
    I: Completion<'a>,
    C: Completion<'a, Value = I::Value>,
    F: FnOnce(I::Error) -> C + Send + 'a,
{
    move |input: I| input.or_else(f)
}

/// Curried [`Completion::or_through`].
pub fn or_through<'a, I, C, F>(f: F) -> impl FnOnce(I) -> I::Join<C, I::Value, I::Error>
where
    I: Completion<'a>,
    C: Completion<'a, Error = I::Error>,
    F: FnOnce(&I::Error) -> C + Send + 'a,
{
    move |input: I| input.or_through(f)
}

/// Curried [`Completion::inspect`].
pub fn inspect<'a, I, X, F>(f: F) -> impl FnOnce(I) -> I::Join<X::Completion, I::Value, I::Error>
where
    I: Completion<'a>,
    X: Effect<'a>,
    F: FnOnce(&I::Value) -> X + Send + 'a,
{
    move |input: I| input.inspect(f)
}

/// Curried [`Completion::inspect_error`].
pub fn inspect_error<'a, I, X, F>(
    f: F,
) -> impl FnOnce(I) -> I::Join<X::Completion, I::Value, I::Error>
where
    I: Completion<'a>,
    X: Effect<'a>,
    F: FnOnce(&I::Error) -> X + Send + 'a,
{
    move |input: I| input.inspect_error(f)
}

/// Curried [`Completion::bind`].
pub fn bind<'a, I, K, C, F>(key: K, f: F) -> impl FnOnce(I) -> I::Join<C, I::Value, I::Error>
where
    I: Completion<'a>,
    K: Send + 'a,
    C: Completion<'a, Error = I::Error>,
    F: FnOnce(&I::Value) -> C + Send + 'a,
    I::Value: Record<K, C::Value>,
{
    move |input: I| input.bind(key, f)
}

/// Stage form of [`unwrap::unwrap`](crate::unwrap::unwrap).
pub fn unwrap<'a, I>() -> impl FnOnce(I) -> I::Eventual<I::Value>
where
    I: Completion<'a>,
    I::Error: Debug,
{
    move |input: I| crate::unwrap::unwrap(input)
}

/// Stage form of [`unwrap::unwrap_or`](crate::unwrap::unwrap_or).
pub fn unwrap_or<'a, I>(default: I::Value) -> impl FnOnce(I) -> I::Eventual<I::Value>
where
    I: Completion<'a>,
{
    move |input: I| crate::unwrap::unwrap_or(input, default)
}

/// Stage form of [`unwrap::unwrap_or_else`](crate::unwrap::unwrap_or_else).
pub fn unwrap_or_else<'a, I, F>(f: F) -> impl FnOnce(I) -> I::Eventual<I::Value>
where
    I: Completion<'a>,
    F: FnOnce(I::Error) -> I::Value + Send + 'a,
{
    move |input: I| crate::unwrap::unwrap_or_else(input, f)
}

/// Stage form of [`unwrap::unwrap_error`](crate::unwrap::unwrap_error).
pub fn unwrap_error<'a, I>() -> impl FnOnce(I) -> I::Eventual<I::Error>
where
    I: Completion<'a>,
    I::Value: Debug,
{
    move |input: I| crate::unwrap::unwrap_error(input)
}

/// Stage form of [`unwrap::unwrap_error_or`](crate::unwrap::unwrap_error_or).
pub fn unwrap_error_or<'a, I>(default: I::Error) -> impl FnOnce(I) -> I::Eventual<I::Error>
where
    I: Completion<'a>,
{
    move |input: I| crate::unwrap::unwrap_error_or(input, default)
}

/// Stage form of [`unwrap::assert_success`](crate::unwrap::assert_success).
pub fn assert_success<'a, I>() -> impl FnOnce(I) -> I::Shape<I::Value, Infallible>
where
    I: Completion<'a>,
{
    move |input: I| crate::unwrap::assert_success(input)
}

/// Stage form of [`unwrap::assert_failure`](crate::unwrap::assert_failure).
pub fn assert_failure<'a, I>() -> impl FnOnce(I) -> I::Shape<Infallible, I::Error>
where
    I: Completion<'a>,
{
    move |input: I| crate::unwrap::assert_failure(input)
}
