//! Left-to-right composition.
//!
//! `pipe!(value, f, g, h)` is `h(g(f(value)))`. Stages are any callables,
//! typically the curried functions from [`combinators`](crate::combinators).
//! [`Pipe::pipe`] is the same thing as a method.

/// Thread a value through a list of stages, left to right.
///
/// ```
/// use outcomes::combinators::{and_then, map};
/// use outcomes::prelude::*;
///
/// let out = pipe!(
///     succeed::<i32, String>(2),
///     map(|v: i32| v * 10),
///     and_then(|v: i32| succeed::<String, String>(v.to_string())),
/// );
/// assert_eq!(out, succeed("20".to_string()));
/// ```
#[macro_export]
macro_rules! pipe {
    ($value:expr $(,)?) => {
        $value
    };
    ($value:expr, $stage:expr $(, $rest:expr)* $(,)?) => {
        $crate::pipe!(($stage)($value) $(, $rest)*)
    };
}

/// Method-call form of [`pipe!`](crate::pipe!).
pub trait Pipe: Sized {
    /// Apply `f` to `self`.
    fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
