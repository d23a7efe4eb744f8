//! Tower integration: services whose call errors become outcomes.
//!
//! [`AttemptLayer`] is the boundary adapter for a [`Service`]. Every call on
//! the wrapped service resolves to `Ok(Outcome<Response, E>)`: a response is a
//! success and a call error is converted into a domain failure with the catch
//! function. Readiness errors from `poll_ready` are not domain failures and
//! stay service errors.
//!
//! ```
//! use outcomes::service::AttemptLayer;
//! use outcomes::prelude::*;
//! use tower::{service_fn, ServiceBuilder, ServiceExt};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let svc = ServiceBuilder::new()
//!     .layer(AttemptLayer::new(|e: std::io::Error| e.kind()))
//!     .service(service_fn(|id: u32| async move {
//!         if id == 0 {
//!             Err(std::io::Error::from(std::io::ErrorKind::NotFound))
//!         } else {
//!             Ok(id * 2)
//!         }
//!     }));
//!
//! let found = svc.clone().oneshot(21).await.unwrap();
//! assert_eq!(found, succeed(42));
//! let missing = svc.oneshot(0).await.unwrap();
//! assert_eq!(missing, fail(std::io::ErrorKind::NotFound));
//! # });
//! ```

use crate::boundary::Catch;
use crate::Outcome;
use futures::ready;
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

/// Layer converting a service's call errors into [`Outcome`] failures.
pub struct AttemptLayer<C> {
    catch: Catch<C>,
}

impl<C> AttemptLayer<C> {
    /// `catch` maps the inner service's error into a domain error.
    pub fn new(catch: C) -> Self {
        Self { catch: Catch::new(catch) }
    }
}

impl<C> Clone for AttemptLayer<C> {
    fn clone(&self) -> Self {
        Self { catch: self.catch.clone() }
    }
}

impl<S, C> Layer<S> for AttemptLayer<C> {
    type Service = AttemptService<S, C>;

    fn layer(&self, inner: S) -> Self::Service {
        AttemptService { inner, catch: self.catch.clone() }
    }
}

/// Service produced by [`AttemptLayer`].
pub struct AttemptService<S, C> {
    inner: S,
    catch: Catch<C>,
}

impl<S: Clone, C> Clone for AttemptService<S, C> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), catch: self.catch.clone() }
    }
}

impl<S, C, E, Request> Service<Request> for AttemptService<S, C>
where
    S: Service<Request>,
    C: Fn(S::Error) -> E,
{
    type Response = Outcome<S::Response, E>;
    type Error = S::Error;
    type Future = AttemptFuture<S::Future, C>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        AttemptFuture { inner: self.inner.call(req), catch: self.catch.clone() }
    }
}

/// Response future of [`AttemptService`].
#[pin_project]
pub struct AttemptFuture<F, C> {
    #[pin]
    inner: F,
    catch: Catch<C>,
}

impl<F, C, T, X, E> Future for AttemptFuture<F, C>
where
    F: Future<Output = Result<T, X>>,
    C: Fn(X) -> E,
{
    type Output = Result<Outcome<T, E>, X>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = ready!(this.inner.poll(cx));
        Poll::Ready(Ok(this.catch.convert(result)))
    }
}
