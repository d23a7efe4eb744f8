//! Aggregating containers of outcomes.
//!
//! Two scans are provided, both keeping the container kind:
//!
//! - [`sequence`] stops at the first failure and returns that error alone.
//!   Elements are mapped and settled strictly in order, so a later element
//!   that would fail sooner never wins.
//! - [`collect`] evaluates every element and returns every error in container
//!   order. Deferred elements settle concurrently.
//!
//! A container of immediate outcomes aggregates immediately; a container of
//! [`Deferred`](crate::Deferred) values aggregates into a `Deferred`.
//!
//! ```
//! use outcomes::prelude::*;
//!
//! let first = sequence(vec![succeed(1), fail("e1"), fail("e2")]);
//! assert_eq!(first, fail("e1"));
//!
//! let all = collect(vec![succeed(1), fail("e1"), fail("e2")]);
//! assert_eq!(all, fail(vec!["e1", "e2"]));
//! ```

use crate::completion::Completion;
use std::collections::{BTreeMap, HashMap};
use std::convert::identity;
use std::hash::{BuildHasher, Hash};

/// A container whose elements can be aggregated.
///
/// Entries are visited in the container's own iteration order; the output is
/// rebuilt from the same keys.
pub trait Container {
    /// Position of an element: `()` for sequences, the key for maps.
    type Key: Send;
    /// Element type.
    type Item;
    /// The same container holding `T` instead of `Item`.
    type Output<T>;

    /// Drain the container into `(key, item)` pairs in iteration order.
    fn into_entries(self) -> Vec<(Self::Key, Self::Item)>;

    /// Rebuild the container from pairs produced by [`Container::into_entries`].
    fn from_entries<T>(entries: Vec<(Self::Key, T)>) -> Self::Output<T>;
}

impl<X> Container for Vec<X> {
    type Key = ();
    type Item = X;
    type Output<T> = Vec<T>;

    fn into_entries(self) -> Vec<((), X)> {
        self.into_iter().map(|item| ((), item)).collect()
    }

    fn from_entries<T>(entries: Vec<((), T)>) -> Vec<T> {
        entries.into_iter().map(|(_, value)| value).collect()
    }
}

impl<K, X> Container for BTreeMap<K, X>
where
    K: Ord + Send,
{
    type Key = K;
    type Item = X;
    type Output<T> = BTreeMap<K, T>;

    fn into_entries(self) -> Vec<(K, X)> {
        self.into_iter().collect()
    }

    fn from_entries<T>(entries: Vec<(K, T)>) -> BTreeMap<K, T> {
        entries.into_iter().collect()
    }
}

impl<K, X, S> Container for HashMap<K, X, S>
where
    K: Eq + Hash + Send,
    S: BuildHasher + Default,
{
    type Key = K;
    type Item = X;
    type Output<T> = HashMap<K, T, S>;

    fn into_entries(self) -> Vec<(K, X)> {
        self.into_iter().collect()
    }

    fn from_entries<T>(entries: Vec<(K, T)>) -> HashMap<K, T, S> {
        entries.into_iter().collect()
    }
}

/// Fail-fast aggregation of a container of outcomes.
pub fn sequence<'a, A, C>(container: A) -> C::Shape<A::Output<C::Value>, C::Error>
where
    A: Container<Item = C> + 'a,
    A::Key: 'a,
    A::Output<C::Value>: Send + 'a,
    C: Completion<'a>,
{
    sequence_with(container, identity)
}

/// Fail-fast aggregation after mapping every element through `f`.
///
/// `f` is not called for elements after the first failure.
pub fn sequence_with<'a, A, C, F>(container: A, f: F) -> C::Shape<A::Output<C::Value>, C::Error>
where
    A: Container + 'a,
    A::Key: 'a,
    A::Item: Send + 'a,
    A::Output<C::Value>: Send + 'a,
    C: Completion<'a>,
    F: FnMut(A::Item) -> C + Send + 'a,
{
    let entries = container.into_entries();
    tracing::trace!(len = entries.len(), "sequence scan");
    C::traverse(entries, f, A::from_entries::<C::Value>)
}

/// Exhaustive aggregation of a container of outcomes.
pub fn collect<'a, A, C>(container: A) -> C::Shape<A::Output<C::Value>, Vec<C::Error>>
where
    A: Container<Item = C> + 'a,
    A::Key: 'a,
    A::Output<C::Value>: Send + 'a,
    C: Completion<'a>,
{
    collect_with(container, identity)
}

/// Exhaustive aggregation after mapping every element through `f`.
pub fn collect_with<'a, A, C, F>(
    container: A,
    f: F,
) -> C::Shape<A::Output<C::Value>, Vec<C::Error>>
where
    A: Container + 'a,
    A::Key: 'a,
    A::Item: Send + 'a,
    A::Output<C::Value>: Send + 'a,
    C: Completion<'a>,
    F: FnMut(A::Item) -> C + Send + 'a,
{
    let entries = container.into_entries();
    tracing::trace!(len = entries.len(), "collect scan");
    C::gather(entries, f, A::from_entries::<C::Value>)
}

/// Same as [`collect`]; kept for callers that only combine plain containers.
pub fn combine<'a, A, C>(container: A) -> C::Shape<A::Output<C::Value>, Vec<C::Error>>
where
    A: Container<Item = C> + 'a,
    A::Key: 'a,
    A::Output<C::Value>: Send + 'a,
    C: Completion<'a>,
{
    collect(container)
}
