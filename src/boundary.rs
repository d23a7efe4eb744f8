//! Boundary adapters for computations that signal failure by raising.
//!
//! In Rust a computation "raises" by returning `Err`. [`attempt`] wraps such a
//! body and converts its result into an [`Outcome`]. The builder must be
//! finished with one of two modes before it can run:
//!
//! - [`Attempt::catch`] converts the raised error into a domain error.
//! - [`Attempt::safe`] declares the body total. The body returns a bare value
//!   and the outcome's error type is [`Infallible`].
//!
//! Panics are never caught in either mode; they propagate unmodified.
//!
//! A finished adapter either runs once ([`run`](Attempt::run)) or is reused as
//! a function of one (possibly tuple) argument ([`call`](Attempt::call),
//! [`into_fn`](Attempt::into_fn)). Each has a `_deferred` counterpart for
//! bodies that return a future.
//!
//! ```
//! use outcomes::prelude::*;
//!
//! let port = attempt(|raw: &str| raw.parse::<u16>())
//!     .catch(|e: std::num::ParseIntError| format!("bad port: {e}"))
//!     .into_fn();
//!
//! assert_eq!(port("8080"), succeed(8080));
//! assert!(port("http").is_failure());
//!
//! let now = attempt(|| 21 * 2).safe().run();
//! assert_eq!(now.into_value(), 42);
//! ```

use crate::{Deferred, Outcome};
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

/// Start a boundary adapter around `body`.
pub fn attempt<F>(body: F) -> Attempt<F, Unhandled> {
    Attempt { body, mode: Unhandled }
}

/// A body waiting to be run as an outcome-returning computation.
///
/// `M` records how raised errors are handled: [`Unhandled`] until
/// [`catch`](Attempt::catch) or [`safe`](Attempt::safe) is chosen.
#[must_use = "an attempt does nothing until it is run or called"]
pub struct Attempt<F, M> {
    body: F,
    mode: M,
}

/// No handling chosen yet; the adapter cannot run.
#[derive(Debug, Clone, Copy)]
pub struct Unhandled;

/// The body is declared total.
#[derive(Debug, Clone, Copy)]
pub struct Safe;

/// Raised errors are converted with a catch function.
pub struct Catch<C>(Arc<C>);

impl<C> Clone for Catch<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C> Catch<C> {
    pub(crate) fn new(catch: C) -> Self {
        Self(Arc::new(catch))
    }

    pub(crate) fn convert<T, X, E>(&self, result: Result<T, X>) -> Outcome<T, E>
    where
        C: Fn(X) -> E,
    {
        match result {
            Ok(value) => Outcome::Success { value },
            Err(raised) => {
                tracing::debug!("boundary caught a raised error");
                Outcome::Failure { error: (self.0)(raised) }
            }
        }
    }
}

impl<F> Attempt<F, Unhandled> {
    /// Convert raised errors with `catch`.
    pub fn catch<C>(self, catch: C) -> Attempt<F, Catch<C>> {
        Attempt { body: self.body, mode: Catch::new(catch) }
    }

    /// Declare that the body cannot fail.
    pub fn safe(self) -> Attempt<F, Safe> {
        Attempt { body: self.body, mode: Safe }
    }
}

impl<F, C> Attempt<F, Catch<C>> {
    /// Run a zero-argument body now.
    pub fn run<T, X, E>(self) -> Outcome<T, E>
    where
        F: FnOnce() -> Result<T, X>,
        C: Fn(X) -> E,
    {
        self.mode.convert((self.body)())
    }

    /// Start a zero-argument asynchronous body; a rejection becomes a failure.
    pub fn run_deferred<'a, Fut, T, X, E>(self) -> Deferred<'a, T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, X>> + Send + 'a,
        C: Fn(X) -> E + Send + Sync + 'a,
    {
        let pending = (self.body)();
        let mode = self.mode;
        Deferred::new(async move { mode.convert(pending.await) })
    }

    /// Call the body with `args`.
    pub fn call<A, T, X, E>(&self, args: A) -> Outcome<T, E>
    where
        F: Fn(A) -> Result<T, X>,
        C: Fn(X) -> E,
    {
        self.mode.convert((self.body)(args))
    }

    /// Call an asynchronous body with `args`.
    pub fn call_deferred<'a, A, Fut, T, X, E>(&self, args: A) -> Deferred<'a, T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, X>> + Send + 'a,
        C: Fn(X) -> E + Send + Sync + 'a,
    {
        let pending = (self.body)(args);
        let mode = self.mode.clone();
        Deferred::new(async move { mode.convert(pending.await) })
    }

    /// Turn the adapter into a plain function returning outcomes.
    pub fn into_fn<A, T, X, E>(self) -> impl Fn(A) -> Outcome<T, E>
    where
        F: Fn(A) -> Result<T, X>,
        C: Fn(X) -> E,
    {
        move |args| self.call(args)
    }

    /// Turn the adapter into a function returning deferred outcomes.
    pub fn into_deferred_fn<'a, A, Fut, T, X, E>(self) -> impl Fn(A) -> Deferred<'a, T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, X>> + Send + 'a,
        C: Fn(X) -> E + Send + Sync + 'a,
    {
        move |args| self.call_deferred(args)
    }
}

impl<F> Attempt<F, Safe> {
    /// Run a zero-argument total body now.
    pub fn run<T>(self) -> Outcome<T, Infallible>
    where
        F: FnOnce() -> T,
    {
        Outcome::Success { value: (self.body)() }
    }

    /// Start a zero-argument asynchronous total body.
    pub fn run_deferred<'a, Fut, T>(self) -> Deferred<'a, T, Infallible>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'a,
        T: Send + 'a,
    {
        Deferred::succeed((self.body)())
    }

    /// Call the total body with `args`.
    pub fn call<A, T>(&self, args: A) -> Outcome<T, Infallible>
    where
        F: Fn(A) -> T,
    {
        Outcome::Success { value: (self.body)(args) }
    }

    /// Call an asynchronous total body with `args`.
    pub fn call_deferred<'a, A, Fut, T>(&self, args: A) -> Deferred<'a, T, Infallible>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = T> + Send + 'a,
        T: Send + 'a,
    {
        Deferred::succeed((self.body)(args))
    }

    /// Turn the total body into a reusable function of the same argument.
    pub fn into_fn<A, T>(self) -> impl Fn(A) -> Outcome<T, Infallible>
    where
        F: Fn(A) -> T,
    {
        move |args| self.call(args)
    }

    /// Asynchronous counterpart of [`into_fn`](Self::into_fn).
    pub fn into_deferred_fn<'a, A, Fut, T>(self) -> impl Fn(A) -> Deferred<'a, T, Infallible>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = T> + Send + 'a,
        T: Send + 'a,
    {
        move |args| self.call_deferred(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fail, succeed};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    enum ConfigError {
        Missing(String),
    }

    fn read(key: &str) -> Result<String, std::io::Error> {
        match key {
            "home" => Ok("/root".into()),
            other => Err(std::io::Error::new(std::io::ErrorKind::NotFound, other.to_string())),
        }
    }

    #[test]
    fn run_converts_raised_errors() {
        let ok = attempt(|| read("home")).catch(|e: std::io::Error| e.kind()).run();
        assert_eq!(ok, succeed("/root".to_string()));

        let err = attempt(|| read("path"))
            .catch(|e: std::io::Error| ConfigError::Missing(e.to_string()))
            .run();
        assert_eq!(err, fail(ConfigError::Missing("path".into())));
    }

    #[test]
    fn into_fn_is_reusable() {
        let lookup = attempt(read).catch(|e: std::io::Error| e.to_string()).into_fn();
        assert_eq!(lookup("home"), succeed("/root".to_string()));
        assert_eq!(lookup("nope"), fail("nope".to_string()));
    }

    #[test]
    fn tuple_arguments_keep_the_parameter_list() {
        let divide = attempt(|(a, b): (i32, i32)| a.checked_div(b).ok_or("division by zero"))
            .catch(|e: &str| e.to_uppercase())
            .into_fn();
        assert_eq!(divide((8, 2)), succeed(4));
        assert_eq!(divide((1, 0)), fail("DIVISION BY ZERO".to_string()));
    }

    #[test]
    fn body_runs_once_per_call() {
        let calls = AtomicUsize::new(0);
        let adapter = attempt(|n: usize| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(n)
        })
        .catch(|_: ()| "never");
        assert_eq!(adapter.call(1), succeed(1));
        assert_eq!(adapter.call(2), succeed(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn safe_mode_returns_the_value() {
        let doubled = attempt(|v: i32| v * 2).safe().into_fn();
        assert_eq!(doubled(21).into_value(), 42);
    }

    #[test]
    #[should_panic(expected = "raw failure")]
    fn safe_mode_propagates_panics_unmodified() {
        let _ = attempt(|| -> i32 { panic!("raw failure") }).safe().run();
    }

    #[test]
    #[should_panic(expected = "not an Err")]
    fn catch_mode_does_not_catch_panics() {
        let _ = attempt(|| -> Result<i32, String> { panic!("not an Err") })
            .catch(|e: String| e)
            .run();
    }

    #[tokio::test]
    async fn deferred_rejections_become_failures() {
        let out = attempt(|| async { Err::<i32, _>("rejected") })
            .catch(|e: &str| e.len())
            .run_deferred()
            .await;
        assert_eq!(out, fail(8));

        let fetch = attempt(|id: u32| async move {
            tokio::task::yield_now().await;
            if id == 0 {
                Err("no such id")
            } else {
                Ok(id * 10)
            }
        })
        .catch(|e: &'static str| e.to_string())
        .into_deferred_fn();
        assert_eq!(fetch(4).await, succeed(40));
        assert_eq!(fetch(0).await, fail("no such id".to_string()));
    }

    #[tokio::test]
    async fn safe_deferred() {
        let later = attempt(|| async { 7 }).safe().run_deferred();
        assert_eq!(later.await.into_value(), 7);

        let echo = attempt(|s: &'static str| async move { s }).safe();
        assert_eq!(echo.call_deferred("hi").await.into_value(), "hi");
    }
}
