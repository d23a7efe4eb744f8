//! Completion duality and the combinator algebra.
//!
//! Every combinator is written once against [`Completion`], which both
//! [`Outcome`] (immediate) and [`Deferred`] (settles later) implement. The
//! shape of a combinator's result is computed by the type system:
//!
//! | input        | continuation returns | result       |
//! |--------------|----------------------|--------------|
//! | `Outcome`    | `Outcome`            | `Outcome`    |
//! | `Outcome`    | `Deferred`           | `Deferred`   |
//! | `Deferred`   | `Outcome`            | `Deferred`   |
//! | `Deferred`   | `Deferred`           | `Deferred`   |
//!
//! Immediate chains therefore stay synchronous, and a single deferred stage
//! makes everything after it deferred.
//!
//! ```
//! use outcomes::prelude::*;
//!
//! fn half(v: i32) -> Outcome<i32, String> {
//!     if v % 2 == 0 { succeed(v / 2) } else { fail(format!("{v} is odd")) }
//! }
//!
//! // Immediate in, immediate out: no runtime needed.
//! let now: Outcome<i32, String> = succeed(8).and_then(half).and_then(half);
//! assert_eq!(now, succeed(2));
//!
//! // A deferred continuation turns the result into a `Deferred`.
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let later = succeed::<i32, String>(8)
//!     .and_then(|v| Deferred::new(async move { half(v) }))
//!     .and_then(half);
//! assert_eq!(later.await, succeed(2));
//! # });
//! ```

use crate::record::Record;
use crate::{Deferred, Outcome};
use futures::future::BoxFuture;
use std::convert::{identity, Infallible};

/// What a [`Completion::chain`] continuation decided to do with a settled outcome.
pub enum Step<C, G, T, E> {
    /// Finish immediately with this outcome.
    Done(Outcome<T, E>),
    /// Settle `C`, then finish by passing its outcome through `G`.
    Await(C, G),
}

/// An outcome that is either available now or will settle later.
///
/// The `'a` lifetime bounds everything a deferred completion may capture.
/// Immediate outcomes satisfy any `'a`.
pub trait Completion<'a>: Sized + Send + 'a {
    /// Success payload.
    type Value: Send + 'a;
    /// Failure payload.
    type Error: Send + 'a;
    /// The same shape with another payload.
    type Shape<T: Send + 'a, E: Send + 'a>: Completion<'a, Value = T, Error = E>;
    /// The union of this shape and a continuation's shape `C`.
    type Join<C: Completion<'a>, T: Send + 'a, E: Send + 'a>: Completion<'a, Value = T, Error = E>;
    /// A bare value in this shape: the value itself, or a future of it.
    type Eventual<T: Send + 'a>: Send + 'a;

    /// Lift an immediate outcome into this shape.
    fn ready<T: Send + 'a, E: Send + 'a>(outcome: Outcome<T, E>) -> Self::Shape<T, E>;

    /// Transform the settled outcome, keeping the shape.
    fn settle_with<T, E, G>(self, g: G) -> Self::Shape<T, E>
    where
        T: Send + 'a,
        E: Send + 'a,
        G: FnOnce(Outcome<Self::Value, Self::Error>) -> Outcome<T, E> + Send + 'a;

    /// Reduce the settled outcome to a bare value in this shape.
    fn settle_into<T, G>(self, g: G) -> Self::Eventual<T>
    where
        T: Send + 'a,
        G: FnOnce(Outcome<Self::Value, Self::Error>) -> T + Send + 'a;

    /// Settle, decide a [`Step`], and settle the continuation it names.
    ///
    /// Every single-outcome combinator is expressed through this primitive.
    fn chain<C, G, T, E, F>(self, f: F) -> Self::Join<C, T, E>
    where
        C: Completion<'a>,
        T: Send + 'a,
        E: Send + 'a,
        G: FnOnce(Outcome<C::Value, C::Error>) -> Outcome<T, E> + Send + 'a,
        F: FnOnce(Outcome<Self::Value, Self::Error>) -> Step<C, G, T, E> + Send + 'a;

    /// Forget immediacy.
    fn into_deferred(self) -> Deferred<'a, Self::Value, Self::Error>;

    /// Fail-fast, in-order scan of `entries` mapped through `f`.
    ///
    /// `f` is applied lazily: nothing after the first failure is mapped or
    /// settled.
    fn traverse<K, X, R, F, G>(entries: Vec<(K, X)>, f: F, finish: G) -> Self::Shape<R, Self::Error>
    where
        K: Send + 'a,
        X: Send + 'a,
        R: Send + 'a,
        F: FnMut(X) -> Self + Send + 'a,
        G: FnOnce(Vec<(K, Self::Value)>) -> R + Send + 'a;

    /// Exhaustive scan of `entries` mapped through `f`, collecting every error
    /// in entry order.
    fn gather<K, X, R, F, G>(
        entries: Vec<(K, X)>,
        f: F,
        finish: G,
    ) -> Self::Shape<R, Vec<Self::Error>>
    where
        K: Send + 'a,
        X: Send + 'a,
        R: Send + 'a,
        F: FnMut(X) -> Self + Send + 'a,
        G: FnOnce(Vec<(K, Self::Value)>) -> R + Send + 'a;

    /// Replace a success value with `f(value)`.
    fn map<U, F>(self, f: F) -> Self::Shape<U, Self::Error>
    where
        U: Send + 'a,
        F: FnOnce(Self::Value) -> U + Send + 'a,
    {
        self.settle_with(move |outcome| Outcome::map(outcome, f))
    }

    /// Replace an error with `f(error)`.
    fn map_error<E2, F>(self, f: F) -> Self::Shape<Self::Value, E2>
    where
        E2: Send + 'a,
        F: FnOnce(Self::Error) -> E2 + Send + 'a,
    {
        self.settle_with(move |outcome| Outcome::map_error(outcome, f))
    }

    /// Replace a success with whatever `f(value)` settles to.
    fn and_then<C, F>(self, f: F) -> Self::Join<C, C::Value, Self::Error>
    where
        C: Completion<'a, Error = Self::Error>,
        F: FnOnce(Self::Value) -> C + Send + 'a,
    {
        self.chain(move |outcome| match outcome {
            Outcome::Success { value } => Step::Await(f(value), identity),
            Outcome::Failure { error } => Step::Done(Outcome::Failure { error }),
        })
    }

    /// Run `f(&value)` for its failure only; a success keeps the original value.
    fn and_through<C, F>(self, f: F) -> Self::Join<C, Self::Value, Self::Error>
    where
        C: Completion<'a, Error = Self::Error>,
        F: FnOnce(&Self::Value) -> C + Send + 'a,
    {
        self.chain(move |outcome| match outcome {
            Outcome::Success { value } => {
                let next = f(&value);
                Step::Await(next, move |settled: Outcome<C::Value, C::Error>| match settled {
                    Outcome::Success { .. } => Outcome::Success { value },
                    Outcome::Failure { error } => Outcome::Failure { error },
                })
            }
            Outcome::Failure { error } => Step::Done(Outcome::Failure { error }),
        })
    }

    /// Replace a failure with whatever `f(error)` settles to.
    fn or_else<C, F>(self, f: F) -> Self::Join<C, Self::Value, C::Error>
    where
        C: Completion<'a, Value = Self::Value>,
        F: FnOnce(Self::Error) -> C + Send + 'a,
    {
        self.chain(move |outcome| match outcome {
            Outcome::Success { value } => Step::Done(Outcome::Success { value }),
            Outcome::Failure { error } => Step::Await(f(error), identity),
        })
    }

    /// Run `f(&error)`: a success keeps the original failure, a failure
    /// replaces it.
    fn or_through<C, F>(self, f: F) -> Self::Join<C, Self::Value, Self::Error>
    where
        C: Completion<'a, Error = Self::Error>,
        F: FnOnce(&Self::Error) -> C + Send + 'a,
    {
        self.chain(move |outcome| match outcome {
            Outcome::Success { value } => Step::Done(Outcome::Success { value }),
            Outcome::Failure { error } => {
                let next = f(&error);
                Step::Await(next, move |settled: Outcome<C::Value, C::Error>| match settled {
                    Outcome::Success { .. } => Outcome::Failure { error },
                    Outcome::Failure { error: replaced } => Outcome::Failure { error: replaced },
                })
            }
        })
    }

    /// Observe a success value. A deferred effect is awaited, its result ignored.
    fn inspect<X, F>(self, f: F) -> Self::Join<X::Completion, Self::Value, Self::Error>
    where
        X: Effect<'a>,
        F: FnOnce(&Self::Value) -> X + Send + 'a,
    {
        self.chain(move |outcome| match outcome {
            Outcome::Success { value } => {
                let effect = f(&value).into_completion();
                Step::Await(effect, move |_| Outcome::Success { value })
            }
            Outcome::Failure { error } => Step::Done(Outcome::Failure { error }),
        })
    }

    /// Observe an error. A deferred effect is awaited, its result ignored.
    fn inspect_error<X, F>(self, f: F) -> Self::Join<X::Completion, Self::Value, Self::Error>
    where
        X: Effect<'a>,
        F: FnOnce(&Self::Error) -> X + Send + 'a,
    {
        self.chain(move |outcome| match outcome {
            Outcome::Success { value } => Step::Done(Outcome::Success { value }),
            Outcome::Failure { error } => {
                let effect = f(&error).into_completion();
                Step::Await(effect, move |_| Outcome::Failure { error })
            }
        })
    }

    /// Insert `key => f(&record)` into a record-shaped success value,
    /// overwriting any previous entry for `key`.
    fn bind<K, C, F>(self, key: K, f: F) -> Self::Join<C, Self::Value, Self::Error>
    where
        K: Send + 'a,
        C: Completion<'a, Error = Self::Error>,
        F: FnOnce(&Self::Value) -> C + Send + 'a,
        Self::Value: Record<K, C::Value>,
    {
        self.chain(move |outcome| match outcome {
            Outcome::Success { value } => {
                let next = f(&value);
                Step::Await(next, move |settled: Outcome<C::Value, C::Error>| match settled {
                    Outcome::Success { value: field } => {
                        let mut record = value;
                        record.set(key, field);
                        Outcome::Success { value: record }
                    }
                    Outcome::Failure { error } => Outcome::Failure { error },
                })
            }
            Outcome::Failure { error } => Step::Done(Outcome::Failure { error }),
        })
    }
}

impl<'a, T, E> Completion<'a> for Outcome<T, E>
where
    T: Send + 'a,
    E: Send + 'a,
{
    type Value = T;
    type Error = E;
    type Shape<U: Send + 'a, F: Send + 'a> = Outcome<U, F>;
    type Join<C: Completion<'a>, U: Send + 'a, F: Send + 'a> = C::Shape<U, F>;
    type Eventual<U: Send + 'a> = U;

    fn ready<U: Send + 'a, F: Send + 'a>(outcome: Outcome<U, F>) -> Self::Shape<U, F> {
        outcome
    }

    fn settle_with<U, F, G>(self, g: G) -> Self::Shape<U, F>
    where
        U: Send + 'a,
        F: Send + 'a,
        G: FnOnce(Outcome<T, E>) -> Outcome<U, F> + Send + 'a,
    {
        g(self)
    }

    fn settle_into<U, G>(self, g: G) -> Self::Eventual<U>
    where
        U: Send + 'a,
        G: FnOnce(Outcome<T, E>) -> U + Send + 'a,
    {
        g(self)
    }

    fn chain<C, G, U, F, K>(self, f: K) -> Self::Join<C, U, F>
    where
        C: Completion<'a>,
        U: Send + 'a,
        F: Send + 'a,
        G: FnOnce(Outcome<C::Value, C::Error>) -> Outcome<U, F> + Send + 'a,
        K: FnOnce(Outcome<T, E>) -> Step<C, G, U, F> + Send + 'a,
    {
        match f(self) {
            Step::Done(outcome) => C::ready(outcome),
            Step::Await(next, g) => next.settle_with(g),
        }
    }

    fn into_deferred(self) -> Deferred<'a, T, E> {
        Deferred::ready(self)
    }

    fn traverse<K, X, R, F, G>(entries: Vec<(K, X)>, mut f: F, finish: G) -> Self::Shape<R, E>
    where
        K: Send + 'a,
        X: Send + 'a,
        R: Send + 'a,
        F: FnMut(X) -> Self + Send + 'a,
        G: FnOnce(Vec<(K, T)>) -> R + Send + 'a,
    {
        let mut values = Vec::with_capacity(entries.len());
        for (key, item) in entries {
            match f(item) {
                Outcome::Success { value } => values.push((key, value)),
                Outcome::Failure { error } => return Outcome::Failure { error },
            }
        }
        Outcome::Success { value: finish(values) }
    }

    fn gather<K, X, R, F, G>(entries: Vec<(K, X)>, f: F, finish: G) -> Self::Shape<R, Vec<E>>
    where
        K: Send + 'a,
        X: Send + 'a,
        R: Send + 'a,
        F: FnMut(X) -> Self + Send + 'a,
        G: FnOnce(Vec<(K, T)>) -> R + Send + 'a,
    {
        partition(entries.into_iter().map(map_entry(f)), finish)
    }
}

impl<'a, T, E> Completion<'a> for Deferred<'a, T, E>
where
    T: Send + 'a,
    E: Send + 'a,
{
    type Value = T;
    type Error = E;
    type Shape<U: Send + 'a, F: Send + 'a> = Deferred<'a, U, F>;
    type Join<C: Completion<'a>, U: Send + 'a, F: Send + 'a> = Deferred<'a, U, F>;
    type Eventual<U: Send + 'a> = BoxFuture<'a, U>;

    fn ready<U: Send + 'a, F: Send + 'a>(outcome: Outcome<U, F>) -> Self::Shape<U, F> {
        Deferred::ready(outcome)
    }

    fn settle_with<U, F, G>(self, g: G) -> Self::Shape<U, F>
    where
        U: Send + 'a,
        F: Send + 'a,
        G: FnOnce(Outcome<T, E>) -> Outcome<U, F> + Send + 'a,
    {
        Deferred::new(async move { g(self.await) })
    }

    fn settle_into<U, G>(self, g: G) -> Self::Eventual<U>
    where
        U: Send + 'a,
        G: FnOnce(Outcome<T, E>) -> U + Send + 'a,
    {
        Box::pin(async move { g(self.await) })
    }

    fn chain<C, G, U, F, K>(self, f: K) -> Self::Join<C, U, F>
    where
        C: Completion<'a>,
        U: Send + 'a,
        F: Send + 'a,
        G: FnOnce(Outcome<C::Value, C::Error>) -> Outcome<U, F> + Send + 'a,
        K: FnOnce(Outcome<T, E>) -> Step<C, G, U, F> + Send + 'a,
    {
        Deferred::new(async move {
            match f(self.await) {
                Step::Done(outcome) => outcome,
                Step::Await(next, g) => g(next.into_deferred().await),
            }
        })
    }

    fn into_deferred(self) -> Deferred<'a, T, E> {
        self
    }

    fn traverse<K, X, R, F, G>(entries: Vec<(K, X)>, mut f: F, finish: G) -> Self::Shape<R, E>
    where
        K: Send + 'a,
        X: Send + 'a,
        R: Send + 'a,
        F: FnMut(X) -> Self + Send + 'a,
        G: FnOnce(Vec<(K, T)>) -> R + Send + 'a,
    {
        Deferred::new(async move {
            let mut values = Vec::with_capacity(entries.len());
            for (key, item) in entries {
                match f(item).await {
                    Outcome::Success { value } => values.push((key, value)),
                    Outcome::Failure { error } => return Outcome::Failure { error },
                }
            }
            Outcome::Success { value: finish(values) }
        })
    }

    fn gather<K, X, R, F, G>(entries: Vec<(K, X)>, f: F, finish: G) -> Self::Shape<R, Vec<E>>
    where
        K: Send + 'a,
        X: Send + 'a,
        R: Send + 'a,
        F: FnMut(X) -> Self + Send + 'a,
        G: FnOnce(Vec<(K, T)>) -> R + Send + 'a,
    {
        // Every element is mapped up front, then all of them settle together.
        let (keys, pending): (Vec<K>, Vec<Self>) = entries.into_iter().map(map_entry(f)).unzip();
        Deferred::new(async move {
            let settled = futures::future::join_all(pending).await;
            partition(keys.into_iter().zip(settled), finish)
        })
    }
}

fn map_entry<K, X, C, F>(mut f: F) -> impl FnMut((K, X)) -> (K, C)
where
    F: FnMut(X) -> C,
{
    move |(key, item)| (key, f(item))
}

/// Split settled entries into successes and errors, keeping entry order.
fn partition<K, T, E, R, I, G>(entries: I, finish: G) -> Outcome<R, Vec<E>>
where
    I: IntoIterator<Item = (K, Outcome<T, E>)>,
    G: FnOnce(Vec<(K, T)>) -> R,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for (key, outcome) in entries {
        match outcome {
            Outcome::Success { value } => values.push((key, value)),
            Outcome::Failure { error } => errors.push(error),
        }
    }
    if errors.is_empty() {
        Outcome::Success { value: finish(values) }
    } else {
        Outcome::Failure { error: errors }
    }
}

/// The result of a side-effect continuation passed to `inspect`.
///
/// `()` is an immediate effect. Returning an [`Outcome`] or a [`Deferred`]
/// makes the combinator wait for it; its own success or failure is ignored.
pub trait Effect<'a>: Send + 'a {
    /// The completion the effect settles through.
    type Completion: Completion<'a>;

    /// Lift the effect into a completion the combinator can wait on.
    fn into_completion(self) -> Self::Completion;
}

impl<'a> Effect<'a> for () {
    type Completion = Outcome<(), Infallible>;

    fn into_completion(self) -> Self::Completion {
        Outcome::Success { value: () }
    }
}

impl<'a, T: Send + 'a, E: Send + 'a> Effect<'a> for Outcome<T, E> {
    type Completion = Self;

    fn into_completion(self) -> Self {
        self
    }
}

impl<'a, T: Send + 'a, E: Send + 'a> Effect<'a> for Deferred<'a, T, E> {
    type Completion = Self;

    fn into_completion(self) -> Self {
        self
    }
}
