//! Deferred outcomes: an outcome that will be available later.
//!
//! A [`Deferred`] is an explicitly tagged, boxed future that settles to a
//! plain [`Outcome`]. It never settles to another deferred value, so awaiting
//! one is always enough to inspect the variant.
//!
//! ```
//! use outcomes::prelude::*;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let later: Deferred<'static, i32, String> = Deferred::succeed(async { 2 });
//! let shown = later.map(|v| v.to_string()).await;
//! assert_eq!(shown, succeed("2".to_string()));
//! # });
//! ```

use crate::Outcome;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An outcome whose settlement is deferred.
#[must_use = "deferred outcomes do nothing unless awaited"]
pub struct Deferred<'a, T, E> {
    inner: BoxFuture<'a, Outcome<T, E>>,
}

impl<'a, T, E> Deferred<'a, T, E> {
    /// Tag a future that settles to an outcome.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Outcome<T, E>> + Send + 'a,
    {
        Self { inner: Box::pin(future) }
    }

    /// Wrap an outcome that is already available.
    pub fn ready(outcome: Outcome<T, E>) -> Self
    where
        T: Send + 'a,
        E: Send + 'a,
    {
        Self::new(std::future::ready(outcome))
    }

    /// Succeed with the value a future produces.
    pub fn succeed<F>(value: F) -> Self
    where
        F: Future<Output = T> + Send + 'a,
        T: Send + 'a,
        E: Send + 'a,
    {
        Self::new(async move { Outcome::Success { value: value.await } })
    }

    /// Fail with the error a future produces.
    pub fn fail<F>(error: F) -> Self
    where
        F: Future<Output = E> + Send + 'a,
        T: Send + 'a,
        E: Send + 'a,
    {
        Self::new(async move { Outcome::Failure { error: error.await } })
    }
}

impl<'a> Deferred<'a, (), std::convert::Infallible> {
    /// Lift a side effect so it can be returned from `inspect` continuations.
    pub fn effect<F>(effect: F) -> Self
    where
        F: Future<Output = ()> + Send + 'a,
    {
        Self::new(async move {
            effect.await;
            Outcome::Success { value: () }
        })
    }
}

impl<'a, T, E> Future for Deferred<'a, T, E> {
    type Output = Outcome<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl<'a, T, E> From<Outcome<T, E>> for Deferred<'a, T, E>
where
    T: Send + 'a,
    E: Send + 'a,
{
    fn from(outcome: Outcome<T, E>) -> Self {
        Self::ready(outcome)
    }
}

impl<T, E> fmt::Debug for Deferred<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").field("inner", &"<future>").finish()
    }
}
